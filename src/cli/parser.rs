use crate::export::ExportFormat;
use crate::models::role::Role;
use clap::{Args, Parser, Subcommand};

/// Command-line interface for the clinic records database
#[derive(Parser)]
#[command(
    name = "vetclinic",
    version = env!("CARGO_PKG_VERSION"),
    about = "Veterinary clinic records: animals, visits, treatment history, reminders and reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// User name to log in with (prompted when missing)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<String>,

    /// Password to log in with (prompted when missing)
    #[arg(global = true, long = "password")]
    pub password: Option<String>,

    /// Run in test mode (no config file update, cheap password hashing)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database, the configuration file and the first admin account
    Init {
        #[arg(long = "admin-user", default_value = "admin")]
        admin_user: String,

        #[arg(long = "admin-password", help = "Password of the first admin (prompted when missing)")]
        admin_password: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "edit", help = "Edit the configuration file (default editor: $EDITOR, or nano)")]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Animal records
    #[command(subcommand)]
    Animal(AnimalAction),

    /// Scheduled visits and the daily schedule
    #[command(subcommand)]
    Visit(VisitAction),

    /// Treatment history
    #[command(subcommand)]
    History(HistoryAction),

    /// Clinic locations
    #[command(subcommand)]
    Location(LocationAction),

    /// User accounts
    #[command(subcommand)]
    User(UserAction),

    /// Upcoming-visit reminders
    #[command(subcommand)]
    Reminder(ReminderAction),

    /// Visit, treatment and payment statistics
    #[command(subcommand)]
    Report(ReportAction),

    /// Payment totals for a year or month
    Finance {
        #[arg(long, short, help = "YYYY or YYYY-MM (all periods when omitted)")]
        period: Option<String>,

        #[arg(long, help = "Limit to one location id")]
        location: Option<i64>,

        #[arg(long, value_name = "FILE", help = "Also write a bar chart (SVG) to this absolute path")]
        chart: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct AnimalFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub species: Option<String>,
    #[arg(long)]
    pub breed: Option<String>,
    #[arg(long)]
    pub age: Option<i32>,
    #[arg(long = "owner")]
    pub owner_name: Option<String>,
    #[arg(long = "contact")]
    pub owner_contact: Option<String>,
    #[arg(long = "email")]
    pub owner_email: Option<String>,
    #[arg(long)]
    pub info: Option<String>,
}

#[derive(Subcommand)]
pub enum AnimalAction {
    /// Register a new animal
    Add(AnimalFields),
    /// List all animals
    List,
    /// Show one animal
    Show { id: i64 },
    /// Change the given fields of an animal
    Edit {
        id: i64,
        #[command(flatten)]
        fields: AnimalFields,
    },
    /// Delete an animal (refused while visits or history reference it)
    Delete { id: i64 },
    /// Find animals by name, owner or breed
    Search { term: String },
}

#[derive(Args, Clone, Default)]
pub struct VisitFields {
    #[arg(long = "animal")]
    pub animal_id: Option<i64>,
    #[arg(long = "date", help = "Visit date, YYYY-MM-DD HH:MM")]
    pub visit_date: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "location")]
    pub location_id: Option<i64>,
}

#[derive(Subcommand)]
pub enum VisitAction {
    /// Book a visit (registered by the logged-in user)
    Add(VisitFields),
    /// List scheduled visits
    List,
    /// Change the given fields of a visit
    Edit {
        id: i64,
        #[command(flatten)]
        fields: VisitFields,
    },
    /// Cancel a visit
    Delete { id: i64 },
    /// Close a visit and move it to the treatment history
    Complete {
        id: i64,
        #[arg(long)]
        medication: Option<String>,
        #[arg(long)]
        indications: String,
        #[arg(long)]
        payment: f64,
        #[arg(long = "location", help = "Defaults to the visit's location")]
        location_id: Option<i64>,
        #[arg(long = "attach", value_name = "FILE")]
        attachments: Vec<String>,
    },
    /// Show the visits of one day
    Schedule {
        #[arg(long, help = "YYYY-MM-DD (today when omitted)")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Record a treatment without a prior visit
    Add {
        #[arg(long = "animal")]
        animal_id: i64,
        #[arg(long = "date", help = "Visit date, YYYY-MM-DD HH:MM (now when omitted)")]
        visit_date: Option<String>,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        medication: Option<String>,
        #[arg(long)]
        indications: String,
        #[arg(long)]
        payment: f64,
        #[arg(long = "location")]
        location_id: Option<i64>,
        #[arg(long = "attach", value_name = "FILE")]
        attachments: Vec<String>,
    },
    /// List history, optionally filtered
    List {
        #[arg(long, help = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, help = "Substring of the treating doctor")]
        doctor: Option<String>,
        #[arg(long, help = "Substring of the medication")]
        medication: Option<String>,
    },
    /// Search by animal, owner, date or reason
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long, help = "Substring of YYYY-MM-DD HH:MM:SS")]
        date: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// List files attached to a history record
    Attachments { id: i64 },
}

#[derive(Args, Clone, Default)]
pub struct LocationFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Subcommand)]
pub enum LocationAction {
    Add(LocationFields),
    List,
    Edit {
        id: i64,
        #[command(flatten)]
        fields: LocationFields,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create an account
    Add {
        #[arg(long)]
        username: String,
        #[arg(long = "new-password", help = "Password of the new account (prompted when missing)")]
        new_password: Option<String>,
        #[arg(long, value_enum)]
        role: Role,
    },
    List,
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Visits in the reminder window
    List {
        #[arg(long, help = "Days ahead (configured default when omitted)")]
        days: Option<i64>,
    },
    /// E-mail the owner about one visit
    Send { visit_id: i64 },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Print the statistics tables
    Show {
        #[arg(long, help = "Limit to one location id")]
        location: Option<i64>,
    },
    /// Write the statistics to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        location: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
