use crate::demo::{run_demo, run_month_view, run_week_view, DemoArgs, MonthArgs, WeekArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ke_academy::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "KE Academy API",
    about = "Run the KE Academy website backend or inspect timetables from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render campus timetables without starting the server
    Timetable {
        #[command(subcommand)]
        command: TimetableCommand,
    },
    /// Run a CLI demo covering timetable rendering and inquiry intake
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum TimetableCommand {
    /// Print one week of classes for a campus
    Week(WeekArgs),
    /// Print a month overview for a campus
    Month(MonthArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Timetable {
            command: TimetableCommand::Week(args),
        } => run_week_view(args),
        Command::Timetable {
            command: TimetableCommand::Month(args),
        } => run_month_view(args),
        Command::Demo(args) => run_demo(args),
    }
}
