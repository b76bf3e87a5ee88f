//! CLI commands and argument parsing

use crate::http::DEFAULT_MAX_RETRIES;
use crate::pagination::DEFAULT_MAX_PAGES;
use clap::{Args, Parser, Subcommand};
use std::time::Duration;

/// Command-line client for the Attio CRM API
#[derive(Parser, Debug)]
#[command(name = "attio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config profile to use
    #[arg(long, global = true, env = "ATTIO_PROFILE")]
    pub profile: Option<String>,

    /// Output JSON (default)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output tab-separated id and label columns
    #[arg(long, global = true)]
    pub plain: bool,

    /// Whole-request timeout, retries included (e.g. 30s, 2m)
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Retries after the first attempt for 429/5xx and transport errors
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RETRIES, allow_negative_numbers = true)]
    pub max_retries: i32,

    /// Client-side request ceiling per second, for bulk --all fetches
    #[arg(long, global = true, env = "ATTIO_RATE_LIMIT", value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_limit: Option<u32>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exit with code 3 when a list returns nothing
    #[arg(long, global = true)]
    pub fail_empty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("timeout must not be empty".to_string());
    }
    let duration = humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("timeout must be positive".to_string());
    }
    Ok(duration)
}

/// Offset pagination flags
#[derive(Args, Debug, Clone, Default)]
pub struct OffsetPage {
    /// Page size
    #[arg(long)]
    pub limit: Option<usize>,

    /// Starting offset
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Fetch all pages
    #[arg(long)]
    pub all: bool,

    /// Maximum pages to fetch when --all is set
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,
}

/// Cursor pagination flags
#[derive(Args, Debug, Clone, Default)]
pub struct CursorPage {
    /// Page size
    #[arg(long)]
    pub limit: Option<usize>,

    /// Cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Fetch all pages
    #[arg(long)]
    pub all: bool,

    /// Maximum pages to fetch when --all is set
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,
}

/// JSON payload flag: inline JSON, `@path` or `-` for stdin
#[derive(Args, Debug, Clone)]
pub struct DataArg {
    /// JSON object (inline, @file or - for stdin)
    #[arg(long)]
    pub data: String,
}

/// Filter and sort flags for query endpoints
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Filter JSON (inline, @file or -)
    #[arg(long)]
    pub filter: Option<String>,

    /// Sorts JSON array (inline, @file or -)
    #[arg(long)]
    pub sort: Option<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the workspace and scopes of the current token
    #[command(name = "self")]
    WhoAmI,

    /// Workspace objects
    #[command(subcommand)]
    Objects(ObjectsCommand),

    /// Object and list attributes
    #[command(subcommand)]
    Attributes(AttributesCommand),

    /// Object records
    #[command(subcommand)]
    Records(RecordsCommand),

    /// Lists
    #[command(subcommand)]
    Lists(ListsCommand),

    /// List entries
    #[command(subcommand)]
    Entries(EntriesCommand),

    /// Notes
    #[command(subcommand)]
    Notes(NotesCommand),

    /// Tasks
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Comments
    #[command(subcommand)]
    Comments(CommentsCommand),

    /// Comment threads
    #[command(subcommand)]
    Threads(ThreadsCommand),

    /// Webhooks
    #[command(subcommand)]
    Webhooks(WebhooksCommand),

    /// Meetings, call recordings and transcripts
    #[command(subcommand)]
    Meetings(MeetingsCommand),

    /// Workspace members
    #[command(subcommand)]
    Members(MembersCommand),

    /// Local profile configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
pub enum ObjectsCommand {
    List,
    Get {
        object: String,
    },
    Create(DataArg),
    Update {
        object: String,
        #[command(flatten)]
        data: DataArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum AttributesCommand {
    List {
        /// Object (or list with --list) slug or id
        target: String,
        /// Target is a list
        #[arg(long)]
        list: bool,
        #[arg(long)]
        show_archived: bool,
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        target: String,
        attribute: String,
        #[arg(long)]
        list: bool,
    },
    Create {
        target: String,
        #[arg(long)]
        list: bool,
        #[command(flatten)]
        data: DataArg,
    },
    Update {
        target: String,
        attribute: String,
        #[arg(long)]
        list: bool,
        #[command(flatten)]
        data: DataArg,
    },
    /// Options of a select attribute
    #[command(subcommand)]
    Options(AttributeChoicesCommand),
    /// Statuses of a status attribute
    #[command(subcommand)]
    Statuses(AttributeChoicesCommand),
}

/// Select options and statuses share one shape
#[derive(Subcommand, Debug)]
pub enum AttributeChoicesCommand {
    List {
        target: String,
        attribute: String,
        #[arg(long)]
        list: bool,
        #[arg(long)]
        show_archived: bool,
    },
    Create {
        target: String,
        attribute: String,
        #[arg(long)]
        list: bool,
        #[command(flatten)]
        data: DataArg,
    },
    Update {
        target: String,
        attribute: String,
        /// Option or status id or title
        choice: String,
        #[arg(long)]
        list: bool,
        #[command(flatten)]
        data: DataArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordsCommand {
    /// Query records with an optional filter and sort
    Query {
        object: String,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        page: OffsetPage,
    },
    /// Fuzzy search records
    Search {
        query: String,
        /// Comma-separated object slugs
        #[arg(long, value_delimiter = ',')]
        objects: Vec<String>,
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
    Get {
        object: String,
        record_id: String,
    },
    Create {
        object: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Create or update by a unique attribute
    Assert {
        object: String,
        #[arg(long)]
        matching_attribute: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Append to multiselect values
    Update {
        object: String,
        record_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Overwrite multiselect values
    Replace {
        object: String,
        record_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    Delete {
        object: String,
        record_id: String,
    },
    /// Values of one attribute on a record
    Values {
        object: String,
        record_id: String,
        attribute: String,
        /// Include past values
        #[arg(long)]
        show_historic: bool,
        #[command(flatten)]
        page: OffsetPage,
    },
    /// List entries referencing a record
    Entries {
        object: String,
        record_id: String,
        #[command(flatten)]
        page: OffsetPage,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListsCommand {
    List,
    Get {
        list: String,
    },
    Create(DataArg),
    Update {
        list: String,
        #[command(flatten)]
        data: DataArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntriesCommand {
    /// Query entries with an optional filter and sort
    Query {
        list: String,
        #[command(flatten)]
        query: QueryArgs,
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        list: String,
        entry_id: String,
    },
    Create {
        list: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Create or update the entry for a parent record
    Assert {
        list: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Append to multiselect values
    Update {
        list: String,
        entry_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    /// Overwrite multiselect values
    Replace {
        list: String,
        entry_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    Delete {
        list: String,
        entry_id: String,
    },
    /// Values of one attribute on an entry
    Values {
        list: String,
        entry_id: String,
        attribute: String,
        /// Include past values
        #[arg(long)]
        show_historic: bool,
        #[command(flatten)]
        page: OffsetPage,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotesCommand {
    List {
        #[arg(long)]
        parent_object: Option<String>,
        #[arg(long)]
        parent_record_id: Option<String>,
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        note_id: String,
    },
    Create(DataArg),
    Delete {
        note_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    List {
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        linked_object: Option<String>,
        #[arg(long)]
        linked_record_id: Option<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        is_completed: Option<bool>,
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        task_id: String,
    },
    Create(DataArg),
    Update {
        task_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    Delete {
        task_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommand {
    Get {
        comment_id: String,
    },
    Create(DataArg),
    Delete {
        comment_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThreadsCommand {
    List {
        #[arg(long)]
        object: Option<String>,
        #[arg(long)]
        record_id: Option<String>,
        #[arg(long)]
        list: Option<String>,
        #[arg(long)]
        entry_id: Option<String>,
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        thread_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WebhooksCommand {
    List {
        #[command(flatten)]
        page: OffsetPage,
    },
    Get {
        webhook_id: String,
    },
    Create(DataArg),
    Update {
        webhook_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    Delete {
        webhook_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MeetingsCommand {
    List {
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        participants: Option<String>,
        #[arg(long)]
        linked_object: Option<String>,
        #[arg(long)]
        linked_record_id: Option<String>,
        #[arg(long)]
        ends_from: Option<String>,
        #[arg(long)]
        starts_before: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
        #[command(flatten)]
        page: CursorPage,
    },
    Get {
        meeting_id: String,
    },
    /// Find a meeting by external reference or create it
    Create(DataArg),
    /// List call recordings of a meeting
    Recordings {
        meeting_id: String,
        #[command(flatten)]
        page: CursorPage,
    },
    /// Show one call recording
    Recording {
        meeting_id: String,
        call_recording_id: String,
    },
    /// Attach a call recording to a meeting
    CreateRecording {
        meeting_id: String,
        #[command(flatten)]
        data: DataArg,
    },
    DeleteRecording {
        meeting_id: String,
        call_recording_id: String,
    },
    /// Transcript segments of a call recording
    Transcript {
        meeting_id: String,
        call_recording_id: String,
        #[command(flatten)]
        page: CursorPage,
    },
}

#[derive(Subcommand, Debug)]
pub enum MembersCommand {
    List,
    Get { workspace_member_id: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the config with keys masked
    Show,
    /// Store an API key for the selected profile
    SetKey {
        api_key: String,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Make a profile the default
    Use { profile: String },
}
