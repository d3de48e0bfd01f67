use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use valuebox_lifecycle::{scope::{AssignPolicy, Scope}, value_box::{BoxFactory, ValueBox}};

/// Walks a ValueBox through construction, copy, move, assignment and destruction,
/// tracing every lifecycle event.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// More trace output (repeat for slot-level detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only print advisories and the explicit prints.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Reject copy-assignment from a drained box instead of warning.
    #[arg(long)]
    strict: bool,
    /// Also assign a box to itself, by copy and by move.
    #[arg(long)]
    self_assign: bool,
    /// Also copy-assign from the box drained by the move-assignment.
    #[arg(long)]
    copy_from_drained: bool,
}

impl Cli {
    fn level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }

    fn policy(&self) -> AssignPolicy {
        if self.strict { AssignPolicy::Strict } else { AssignPolicy::Lenient }
    }
}

fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn make_two(factory: &BoxFactory) -> ValueBox {
    factory.from_integer(2)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let factory = BoxFactory::new();
    let mut scope = Scope::new(cli.policy());

    let e1 = scope.declare(factory.from_integer(0));
    let e2 = scope.declare(factory.from_character('1'));
    let e4 = {
        let copy = factory.copy_of(scope.get(e1)?).context("copying e1")?;
        scope.declare(copy)
    };
    // Returned by value: a plain move, nothing to trace.
    let e6 = scope.declare(make_two(&factory));
    let e7 = {
        let mut temporary = make_two(&factory);
        scope.declare(ValueBox::moved_from(&mut temporary))
    };
    debug!("e7 declared as {}", scope.get(e7)?);

    println!("{}", scope.get(e6)?);

    scope.copy_assign(e2, e4)?;
    scope.move_assign(e6, e1)?;

    if cli.self_assign {
        scope.copy_assign(e4, e4)?;
        scope.move_assign(e4, e4)?;
    }

    if cli.copy_from_drained {
        let outcome = scope.copy_assign(e4, e1)
            .context("copy-assigning from the drained e1")?;
        debug!("copy from drained box: {outcome:?}");
    }

    println!("{}", scope.get(e2)?);

    info!("{} boxes created, leaving scope", factory.created());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.level());

    run(&cli)
}
