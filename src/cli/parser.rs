use clap::{Parser, Subcommand};

/// Command-line interface definition for rChoreboard
/// Household chores, plant watering and one-off tasks backed by SQLite
#[derive(Parser)]
#[command(
    name = "rchoreboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "A household task tracker CLI: rotating chores, plant watering and one-off tasks using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the current time ("YYYY-MM-DD HH:MM")
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows with this operation (e.g. complete)")]
        operation: Option<String>,
    },

    /// Family members and their availability
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },

    /// Recurring chores, single-assignee or rotating
    Chore {
        #[command(subcommand)]
        action: ChoreAction,
    },

    /// Plants and their watering schedule
    Plant {
        #[command(subcommand)]
        action: PlantAction,
    },

    /// One-off tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// What a member has to do today
    Dashboard {
        /// Member id
        member: i64,

        #[arg(long = "json", help = "Print the dashboard payload as JSON")]
        json: bool,
    },

    /// Completions recorded on this device today
    Today {
        #[arg(long = "reset", help = "Clear today's records and restart from today")]
        reset: bool,

        #[arg(long = "check", help = "Reset only if the day has changed")]
        check: bool,

        #[arg(long = "sync", help = "Align local records with the database")]
        sync: bool,

        #[arg(long = "clear", help = "Remove all local completion state")]
        clear: bool,

        #[arg(long = "watch", help = "Keep checking for midnight and reset when it passes")]
        watch: bool,
    },

    /// Completion statistics
    Stats {
        #[arg(long = "member", help = "Only completions credited to this member")]
        member: Option<i64>,
    },

    /// Build the daily reminder text
    Remind {
        #[arg(long = "member", help = "Only this member (default: everyone)")]
        member: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a family member
    Add {
        name: String,

        #[arg(long = "role", default_value = "member")]
        role: String,
    },

    /// List members and their availability
    List,

    /// Mark a member available again (clears any window)
    Available { id: i64 },

    /// Mark a member unavailable until further notice
    Unavailable { id: i64 },

    /// Set an unavailability window ("YYYY-MM-DD [HH:MM]")
    Away {
        id: i64,

        #[arg(long = "from")]
        from: String,

        #[arg(long = "until")]
        until: String,
    },
}

#[derive(Subcommand)]
pub enum ChoreAction {
    /// Add a chore for one worker or a rotation
    Add {
        name: String,

        #[arg(long = "interval", default_value_t = 1, help = "Days between completions")]
        interval: i64,

        #[arg(long = "worker", conflicts_with = "rotation", help = "Single assignee id")]
        worker: Option<i64>,

        #[arg(long = "rotation", help = "Rotation order as member ids, e.g. 2,5,1")]
        rotation: Option<String>,
    },

    /// Change an existing chore
    Edit {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "interval")]
        interval: Option<i64>,

        #[arg(long = "worker")]
        worker: Option<i64>,

        #[arg(long = "rotation", help = "New rotation order, e.g. 2,5,1")]
        rotation: Option<String>,

        #[arg(long = "no-rotation", conflicts_with = "rotation", requires = "worker")]
        no_rotation: bool,
    },

    /// List chores with their responsible member
    List,

    /// Show who is up next and who was skipped
    Who { id: i64 },

    /// Mark a chore as done
    Done { id: i64 },

    /// Delete a chore
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum PlantAction {
    /// Add a plant
    Add {
        name: String,

        #[arg(long = "interval", default_value_t = 3, help = "Days between waterings")]
        interval: i64,

        #[arg(long = "owner")]
        owner: i64,

        #[arg(long = "image")]
        image: Option<String>,
    },

    /// List plants
    List,

    /// Mark a plant as watered
    Water { id: i64 },

    /// Delete a plant
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a one-off task
    Add {
        name: String,

        #[arg(long = "to", help = "Assignee id")]
        assigned_to: i64,

        #[arg(long = "by", help = "Creator id (default: the assignee)")]
        created_by: Option<i64>,

        #[arg(long = "due", help = "Due date (YYYY-MM-DD [HH:MM])")]
        due: Option<String>,

        #[arg(long = "priority", default_value = "medium")]
        priority: String,

        #[arg(long = "description")]
        description: Option<String>,
    },

    /// List tasks (pending only unless --all)
    List {
        #[arg(long = "all")]
        all: bool,
    },

    /// Mark a task as completed
    Done { id: i64 },

    /// Delete a task
    Del { id: i64 },
}
