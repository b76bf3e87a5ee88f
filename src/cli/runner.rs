//! CLI runner - executes commands

use crate::cli::commands::{
    AttributeChoicesCommand, AttributesCommand, Cli, CommentsCommand, Commands, ConfigCommand, CursorPage, EntriesCommand,
    ListsCommand, MeetingsCommand, MembersCommand, NotesCommand, ObjectsCommand, OffsetPage,
    QueryArgs, RecordsCommand, TasksCommand, ThreadsCommand, WebhooksCommand,
};
use crate::cli::output::{OutputMode, Printer};
use crate::client::{AttioClient, ClientConfig};
use crate::config::{config_path, Config, API_KEY_ENV, BASE_URL_ENV};
use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::pagination::{fetch_all_cursor, fetch_all_offset, Collected};
use crate::resources::{AttributeTarget, MeetingFilter, RecordQuery, TaskFilter, ThreadFilter};
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use std::future::Future;
use std::io::{Read, Write};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Page size for query endpoints
const QUERY_PAGE_SIZE: usize = 500;

/// Page size for GET list endpoints
const LIST_PAGE_SIZE: usize = 50;

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancellationToken,
    config_path: Option<PathBuf>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
            config_path: None,
        }
    }

    /// Use an explicit config file instead of the resolved location
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Token that stops pagination and pending requests when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the command against stdout, cancelling on Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let mode = OutputMode::from_flags(self.cli.json, self.cli.plain)?;

        let cancel = self.cancel.clone();
        let signal = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupted, stopping after the current request");
                cancel.cancel();
            }
        });

        let mut printer = Printer::new(std::io::stdout(), mode);
        let result = self.run_with(&mut printer).await;

        signal.abort();
        result
    }

    /// Run the command, printing through `printer`
    pub async fn run_with<W: Write>(&self, printer: &mut Printer<W>) -> Result<()> {
        let client = match &self.cli.command {
            Commands::Config(command) => return self.config_command(command, printer),
            _ => self.client()?,
        };

        match &self.cli.command {
            Commands::WhoAmI => {
                let info = self.cancellable(client.get_self()).await?;
                printer.value(&info)
            }
            Commands::Objects(command) => self.objects(&client, command, printer).await,
            Commands::Attributes(command) => self.attributes(&client, command, printer).await,
            Commands::Records(command) => self.records(&client, command, printer).await,
            Commands::Lists(command) => self.lists(&client, command, printer).await,
            Commands::Entries(command) => self.entries(&client, command, printer).await,
            Commands::Notes(command) => self.notes(&client, command, printer).await,
            Commands::Tasks(command) => self.tasks(&client, command, printer).await,
            Commands::Comments(command) => self.comments(&client, command, printer).await,
            Commands::Threads(command) => self.threads(&client, command, printer).await,
            Commands::Webhooks(command) => self.webhooks(&client, command, printer).await,
            Commands::Meetings(command) => self.meetings(&client, command, printer).await,
            Commands::Members(command) => self.members(&client, command, printer).await,
            Commands::Config(command) => self.config_command(command, printer),
        }
    }

    // ========================================================================
    // Setup
    // ========================================================================

    fn config_file(&self) -> Result<PathBuf> {
        match self.config_path {
            Some(ref path) => Ok(path.clone()),
            None => config_path(),
        }
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_file()?)
    }

    /// Build the API client from profile, environment and flags
    fn client(&self) -> Result<AttioClient> {
        let config = self.load_config()?;
        let profile = config.profile_name(self.cli.profile.as_deref());

        let api_key = config.resolve_api_key(&profile, env_value(API_KEY_ENV).as_deref())?;
        let base_url = config.resolve_base_url(&profile, env_value(BASE_URL_ENV).as_deref());
        debug!(%profile, %base_url, "resolved client settings");

        let mut builder = ClientConfig::builder()
            .base_url(base_url)
            .api_key(api_key)
            .max_retries(self.cli.max_retries);
        if let Some(timeout) = self.cli.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(per_second) = self.cli.rate_limit {
            builder = builder.rate_limit(RateLimiterConfig::per_second(per_second));
        }
        AttioClient::new(builder.build())
    }

    /// Race a single request against cancellation
    async fn cancellable<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            result = request => result,
        }
    }

    // ========================================================================
    // Listing
    // ========================================================================

    /// Print one offset page, or every page with `--all`
    async fn offset_list<W, F, Fut>(
        &self,
        printer: &mut Printer<W>,
        page: &OffsetPage,
        default_limit: usize,
        mut fetch: F,
    ) -> Result<()>
    where
        W: Write,
        F: FnMut(usize, usize) -> Fut,
        Fut: Future<Output = Result<Vec<JsonObject>>>,
    {
        let limit = page.limit.filter(|l| *l > 0).unwrap_or(default_limit);

        if page.all {
            let start = page.offset;
            let collected = fetch_all_offset(&self.cancel, limit, page.max_pages, |offset| {
                fetch(limit, start + offset)
            })
            .await;
            return self.print_collected(printer, collected);
        }

        let items = self.cancellable(fetch(limit, page.offset)).await?;
        self.print_items(printer, &items)
    }

    /// Print one cursor page, or every page with `--all`.
    ///
    /// With `--all` a `--cursor` value only seeds the first request.
    async fn cursor_list<W, F, Fut>(
        &self,
        printer: &mut Printer<W>,
        page: &CursorPage,
        mut fetch: F,
    ) -> Result<()>
    where
        W: Write,
        F: FnMut(usize, String) -> Fut,
        Fut: Future<Output = Result<(Vec<JsonObject>, String)>>,
    {
        let limit = page.limit.unwrap_or(0);
        let start = page.cursor.clone().unwrap_or_default();

        if page.all {
            let collected = fetch_all_cursor(&self.cancel, page.max_pages, |cursor| {
                let cursor = if cursor.is_empty() {
                    start.clone()
                } else {
                    cursor
                };
                fetch(limit, cursor)
            })
            .await;
            return self.print_collected(printer, collected);
        }

        let (items, next_cursor) = self.cancellable(fetch(limit, start)).await?;
        if items.is_empty() && self.cli.fail_empty {
            printer.cursor_page(&items, &next_cursor)?;
            return Err(Error::NoResults);
        }
        printer.cursor_page(&items, &next_cursor)
    }

    /// Print what was collected; on failure the partial items still go out
    fn print_collected<W: Write>(
        &self,
        printer: &mut Printer<W>,
        collected: Collected<JsonObject>,
    ) -> Result<()> {
        match collected {
            Ok(items) => self.print_items(printer, &items),
            Err(partial) => {
                let (items, error) = partial.into_parts();
                if !items.is_empty() {
                    warn!(count = items.len(), %error, "printing partial results");
                    printer.items(&items)?;
                }
                Err(error)
            }
        }
    }

    fn print_items<W: Write>(&self, printer: &mut Printer<W>, items: &[JsonObject]) -> Result<()> {
        printer.items(items)?;
        if items.is_empty() && self.cli.fail_empty {
            return Err(Error::NoResults);
        }
        Ok(())
    }

    // ========================================================================
    // Resource commands
    // ========================================================================

    async fn objects<W: Write>(
        &self,
        client: &AttioClient,
        command: &ObjectsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            ObjectsCommand::List => {
                let items = self.cancellable(client.list_objects()).await?;
                self.print_items(printer, &items)
            }
            ObjectsCommand::Get { object } => {
                let item = self.cancellable(client.get_object(object)).await?;
                printer.object(&item)
            }
            ObjectsCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_object(&data)).await?;
                printer.object(&item)
            }
            ObjectsCommand::Update { object, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.update_object(object, &data)).await?;
                printer.object(&item)
            }
        }
    }

    async fn attributes<W: Write>(
        &self,
        client: &AttioClient,
        command: &AttributesCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            AttributesCommand::List {
                target,
                list,
                show_archived,
                page,
            } => {
                let kind = attribute_target(*list);
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_attributes(kind, target, *show_archived, limit, offset)
                })
                .await
            }
            AttributesCommand::Get {
                target,
                attribute,
                list,
            } => {
                let kind = attribute_target(*list);
                let item = self
                    .cancellable(client.get_attribute(kind, target, attribute))
                    .await?;
                printer.object(&item)
            }
            AttributesCommand::Create { target, list, data } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.create_attribute(attribute_target(*list), target, &data))
                    .await?;
                printer.object(&item)
            }
            AttributesCommand::Update {
                target,
                attribute,
                list,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let kind = attribute_target(*list);
                let item = self
                    .cancellable(client.update_attribute(kind, target, attribute, &data))
                    .await?;
                printer.object(&item)
            }
            AttributesCommand::Options(command) => {
                self.attribute_choices(client, command, Choices::SelectOptions, printer)
                    .await
            }
            AttributesCommand::Statuses(command) => {
                self.attribute_choices(client, command, Choices::Statuses, printer)
                    .await
            }
        }
    }

    async fn attribute_choices<W: Write>(
        &self,
        client: &AttioClient,
        command: &AttributeChoicesCommand,
        choices: Choices,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            AttributeChoicesCommand::List {
                target,
                attribute,
                list,
                show_archived,
            } => {
                let kind = attribute_target(*list);
                let items = match choices {
                    Choices::SelectOptions => {
                        self.cancellable(client.list_select_options(
                            kind,
                            target,
                            attribute,
                            *show_archived,
                        ))
                        .await?
                    }
                    Choices::Statuses => {
                        self.cancellable(client.list_statuses(kind, target, attribute, *show_archived))
                            .await?
                    }
                };
                self.print_items(printer, &items)
            }
            AttributeChoicesCommand::Create {
                target,
                attribute,
                list,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let kind = attribute_target(*list);
                let item = match choices {
                    Choices::SelectOptions => {
                        self.cancellable(client.create_select_option(kind, target, attribute, &data))
                            .await?
                    }
                    Choices::Statuses => {
                        self.cancellable(client.create_status(kind, target, attribute, &data))
                            .await?
                    }
                };
                printer.object(&item)
            }
            AttributeChoicesCommand::Update {
                target,
                attribute,
                choice,
                list,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let kind = attribute_target(*list);
                let item = match choices {
                    Choices::SelectOptions => {
                        self.cancellable(client.update_select_option(
                            kind, target, attribute, choice, &data,
                        ))
                        .await?
                    }
                    Choices::Statuses => {
                        self.cancellable(client.update_status(kind, target, attribute, choice, &data))
                            .await?
                    }
                };
                printer.object(&item)
            }
        }
    }

    async fn records<W: Write>(
        &self,
        client: &AttioClient,
        command: &RecordsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            RecordsCommand::Query {
                object,
                query,
                page,
            } => {
                let query = record_query(query)?;
                let query = &query;
                self.offset_list(printer, page, QUERY_PAGE_SIZE, |limit, offset| {
                    client.query_records(object, query, limit, offset)
                })
                .await
            }
            RecordsCommand::Search {
                query,
                objects,
                limit,
            } => {
                let items = self
                    .cancellable(client.search_records(query, objects, *limit))
                    .await?;
                self.print_items(printer, &items)
            }
            RecordsCommand::Get { object, record_id } => {
                let item = self.cancellable(client.get_record(object, record_id)).await?;
                printer.object(&item)
            }
            RecordsCommand::Create { object, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_record(object, &data)).await?;
                printer.object(&item)
            }
            RecordsCommand::Assert {
                object,
                matching_attribute,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.assert_record(object, matching_attribute, &data))
                    .await?;
                printer.object(&item)
            }
            RecordsCommand::Update {
                object,
                record_id,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.update_record(object, record_id, &data))
                    .await?;
                printer.object(&item)
            }
            RecordsCommand::Replace {
                object,
                record_id,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.replace_record(object, record_id, &data))
                    .await?;
                printer.object(&item)
            }
            RecordsCommand::Delete { object, record_id } => {
                self.cancellable(client.delete_record(object, record_id))
                    .await?;
                printer.deleted(record_id)
            }
            RecordsCommand::Values {
                object,
                record_id,
                attribute,
                show_historic,
                page,
            } => {
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_record_attribute_values(
                        object,
                        record_id,
                        attribute,
                        *show_historic,
                        limit,
                        offset,
                    )
                })
                .await
            }
            RecordsCommand::Entries {
                object,
                record_id,
                page,
            } => {
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_record_entries(object, record_id, limit, offset)
                })
                .await
            }
        }
    }

    async fn lists<W: Write>(
        &self,
        client: &AttioClient,
        command: &ListsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            ListsCommand::List => {
                let items = self.cancellable(client.list_lists()).await?;
                self.print_items(printer, &items)
            }
            ListsCommand::Get { list } => {
                let item = self.cancellable(client.get_list(list)).await?;
                printer.object(&item)
            }
            ListsCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_list(&data)).await?;
                printer.object(&item)
            }
            ListsCommand::Update { list, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.update_list(list, &data)).await?;
                printer.object(&item)
            }
        }
    }

    async fn entries<W: Write>(
        &self,
        client: &AttioClient,
        command: &EntriesCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            EntriesCommand::Query { list, query, page } => {
                let query = record_query(query)?;
                let query = &query;
                self.offset_list(printer, page, QUERY_PAGE_SIZE, |limit, offset| {
                    client.query_entries(list, query, limit, offset)
                })
                .await
            }
            EntriesCommand::Get { list, entry_id } => {
                let item = self.cancellable(client.get_entry(list, entry_id)).await?;
                printer.object(&item)
            }
            EntriesCommand::Create { list, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_entry(list, &data)).await?;
                printer.object(&item)
            }
            EntriesCommand::Assert { list, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.assert_entry(list, &data)).await?;
                printer.object(&item)
            }
            EntriesCommand::Update {
                list,
                entry_id,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.update_entry(list, entry_id, &data))
                    .await?;
                printer.object(&item)
            }
            EntriesCommand::Replace {
                list,
                entry_id,
                data,
            } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.replace_entry(list, entry_id, &data))
                    .await?;
                printer.object(&item)
            }
            EntriesCommand::Delete { list, entry_id } => {
                self.cancellable(client.delete_entry(list, entry_id)).await?;
                printer.deleted(entry_id)
            }
            EntriesCommand::Values {
                list,
                entry_id,
                attribute,
                show_historic,
                page,
            } => {
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_entry_attribute_values(
                        list,
                        entry_id,
                        attribute,
                        *show_historic,
                        limit,
                        offset,
                    )
                })
                .await
            }
        }
    }

    async fn notes<W: Write>(
        &self,
        client: &AttioClient,
        command: &NotesCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            NotesCommand::List {
                parent_object,
                parent_record_id,
                page,
            } => {
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_notes(
                        parent_object.as_deref(),
                        parent_record_id.as_deref(),
                        limit,
                        offset,
                    )
                })
                .await
            }
            NotesCommand::Get { note_id } => {
                let item = self.cancellable(client.get_note(note_id)).await?;
                printer.object(&item)
            }
            NotesCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_note(&data)).await?;
                printer.object(&item)
            }
            NotesCommand::Delete { note_id } => {
                self.cancellable(client.delete_note(note_id)).await?;
                printer.deleted(note_id)
            }
        }
    }

    async fn tasks<W: Write>(
        &self,
        client: &AttioClient,
        command: &TasksCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            TasksCommand::List {
                sort,
                linked_object,
                linked_record_id,
                assignee,
                is_completed,
                page,
            } => {
                let filter = TaskFilter {
                    sort: sort.clone(),
                    linked_object: linked_object.clone(),
                    linked_record_id: linked_record_id.clone(),
                    assignee: assignee.clone(),
                    is_completed: *is_completed,
                };
                let filter = &filter;
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_tasks(filter, limit, offset)
                })
                .await
            }
            TasksCommand::Get { task_id } => {
                let item = self.cancellable(client.get_task(task_id)).await?;
                printer.object(&item)
            }
            TasksCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_task(&data)).await?;
                printer.object(&item)
            }
            TasksCommand::Update { task_id, data } => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.update_task(task_id, &data)).await?;
                printer.object(&item)
            }
            TasksCommand::Delete { task_id } => {
                self.cancellable(client.delete_task(task_id)).await?;
                printer.deleted(task_id)
            }
        }
    }

    async fn comments<W: Write>(
        &self,
        client: &AttioClient,
        command: &CommentsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            CommentsCommand::Get { comment_id } => {
                let item = self.cancellable(client.get_comment(comment_id)).await?;
                printer.object(&item)
            }
            CommentsCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_comment(&data)).await?;
                printer.object(&item)
            }
            CommentsCommand::Delete { comment_id } => {
                self.cancellable(client.delete_comment(comment_id)).await?;
                printer.deleted(comment_id)
            }
        }
    }

    async fn threads<W: Write>(
        &self,
        client: &AttioClient,
        command: &ThreadsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            ThreadsCommand::List {
                object,
                record_id,
                list,
                entry_id,
                page,
            } => {
                let filter = ThreadFilter {
                    object: object.clone(),
                    record_id: record_id.clone(),
                    list: list.clone(),
                    entry_id: entry_id.clone(),
                };
                let filter = &filter;
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_threads(filter, limit, offset)
                })
                .await
            }
            ThreadsCommand::Get { thread_id } => {
                let item = self.cancellable(client.get_thread(thread_id)).await?;
                printer.object(&item)
            }
        }
    }

    async fn webhooks<W: Write>(
        &self,
        client: &AttioClient,
        command: &WebhooksCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            WebhooksCommand::List { page } => {
                self.offset_list(printer, page, LIST_PAGE_SIZE, |limit, offset| {
                    client.list_webhooks(limit, offset)
                })
                .await
            }
            WebhooksCommand::Get { webhook_id } => {
                let item = self.cancellable(client.get_webhook(webhook_id)).await?;
                printer.object(&item)
            }
            WebhooksCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.create_webhook(&data)).await?;
                printer.object(&item)
            }
            WebhooksCommand::Update { webhook_id, data } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.update_webhook(webhook_id, &data))
                    .await?;
                printer.object(&item)
            }
            WebhooksCommand::Delete { webhook_id } => {
                self.cancellable(client.delete_webhook(webhook_id)).await?;
                printer.deleted(webhook_id)
            }
        }
    }

    async fn meetings<W: Write>(
        &self,
        client: &AttioClient,
        command: &MeetingsCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            MeetingsCommand::List {
                sort,
                participants,
                linked_object,
                linked_record_id,
                ends_from,
                starts_before,
                timezone,
                page,
            } => {
                let filter = MeetingFilter {
                    sort: sort.clone(),
                    participants: participants.clone(),
                    linked_object: linked_object.clone(),
                    linked_record_id: linked_record_id.clone(),
                    ends_from: ends_from.clone(),
                    starts_before: starts_before.clone(),
                    timezone: timezone.clone(),
                };
                let filter = &filter;
                self.cursor_list(printer, page, |limit, cursor| async move {
                    client.list_meetings(filter, limit, &cursor).await
                })
                .await
            }
            MeetingsCommand::Get { meeting_id } => {
                let item = self.cancellable(client.get_meeting(meeting_id)).await?;
                printer.object(&item)
            }
            MeetingsCommand::Create(data) => {
                let data = read_json_object(&data.data)?;
                let item = self.cancellable(client.find_or_create_meeting(&data)).await?;
                printer.object(&item)
            }
            MeetingsCommand::Recordings { meeting_id, page } => {
                self.cursor_list(printer, page, |limit, cursor| async move {
                    client.list_call_recordings(meeting_id, limit, &cursor).await
                })
                .await
            }
            MeetingsCommand::Recording {
                meeting_id,
                call_recording_id,
            } => {
                let item = self
                    .cancellable(client.get_call_recording(meeting_id, call_recording_id))
                    .await?;
                printer.object(&item)
            }
            MeetingsCommand::CreateRecording { meeting_id, data } => {
                let data = read_json_object(&data.data)?;
                let item = self
                    .cancellable(client.create_call_recording(meeting_id, &data))
                    .await?;
                printer.object(&item)
            }
            MeetingsCommand::DeleteRecording {
                meeting_id,
                call_recording_id,
            } => {
                self.cancellable(client.delete_call_recording(meeting_id, call_recording_id))
                    .await?;
                printer.deleted(call_recording_id)
            }
            MeetingsCommand::Transcript {
                meeting_id,
                call_recording_id,
                page,
            } => {
                self.cursor_list(printer, page, |_, cursor| async move {
                    client
                        .get_transcript(meeting_id, call_recording_id, &cursor)
                        .await
                })
                .await
            }
        }
    }

    async fn members<W: Write>(
        &self,
        client: &AttioClient,
        command: &MembersCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        match command {
            MembersCommand::List => {
                let items = self.cancellable(client.list_members()).await?;
                self.print_items(printer, &items)
            }
            MembersCommand::Get {
                workspace_member_id,
            } => {
                let item = self
                    .cancellable(client.get_member(workspace_member_id))
                    .await?;
                printer.object(&item)
            }
        }
    }

    // ========================================================================
    // Local configuration
    // ========================================================================

    fn config_command<W: Write>(
        &self,
        command: &ConfigCommand,
        printer: &mut Printer<W>,
    ) -> Result<()> {
        let path = self.config_file()?;

        match command {
            ConfigCommand::Path => printer.line(&path.display().to_string()),
            ConfigCommand::Show => {
                let config = Config::load_from(&path)?;
                printer.value(&json!({
                    "path": path.display().to_string(),
                    "profile": config.profile_name(self.cli.profile.as_deref()),
                    "config": config.masked(),
                }))
            }
            ConfigCommand::SetKey { api_key, base_url } => {
                if api_key.trim().is_empty() {
                    return Err(Error::usage("API key must not be empty"));
                }
                let mut config = Config::load_from(&path)?;
                let profile = config.profile_name(self.cli.profile.as_deref());
                config.set_api_key(&profile, api_key, base_url.as_deref());
                config.save_to(&path)?;
                printer.value(&json!({ "profile": profile, "saved": true }))
            }
            ConfigCommand::Use { profile } => {
                let mut config = Config::load_from(&path)?;
                config
                    .use_profile(profile)
                    .map_err(|e| Error::usage(e.to_string()))?;
                config.save_to(&path)?;
                printer.value(&json!({ "default_profile": config.default_profile }))
            }
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[derive(Debug, Clone, Copy)]
enum Choices {
    SelectOptions,
    Statuses,
}

fn attribute_target(list: bool) -> AttributeTarget {
    if list {
        AttributeTarget::Lists
    } else {
        AttributeTarget::Objects
    }
}

fn record_query(args: &QueryArgs) -> Result<RecordQuery> {
    let filter = args.filter.as_deref().map(read_json_value).transpose()?;
    let sorts = args.sort.as_deref().map(read_json_value).transpose()?;
    if sorts.as_ref().is_some_and(|s| !s.is_array()) {
        return Err(Error::usage("--sort must be a JSON array"));
    }
    Ok(RecordQuery { filter, sorts })
}

/// Read a JSON object from inline text, `@path` or `-` (stdin)
pub fn read_json_object(input: &str) -> Result<JsonObject> {
    match read_json_value(input)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::usage("expected JSON object")),
    }
}

/// Read a JSON value from inline text, `@path` or `-` (stdin)
pub fn read_json_value(input: &str) -> Result<JsonValue> {
    let raw = read_raw_input(input)?;
    serde_json::from_str(&raw).map_err(|e| Error::usage(format!("invalid JSON: {e}")))
}

fn read_raw_input(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::usage("missing JSON input"));
    }

    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("read stdin")?;
        return Ok(raw);
    }

    if let Some(path) = input.strip_prefix('@') {
        let path = path.trim();
        if path.is_empty() {
            return Err(Error::usage("missing file path after @"));
        }
        return std::fs::read_to_string(path).with_context(|| format!("read {path}"));
    }

    Ok(input.to_string())
}
