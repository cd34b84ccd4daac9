use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use subnet_calc::cli::{run, CommandLine};
use subnet_calc::config::Settings;
use subnet_calc::output::warning;

/// Use the yaml config when present, otherwise log warnings to stderr.
fn init_logging(settings: &Settings) -> Result<(), Box<dyn Error>> {
    if std::path::Path::new(&settings.log_config).exists() {
        log4rs::init_file(&settings.log_config, Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d} {l} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let settings = Settings::from_env();
    init_logging(&settings)?;
    for note in &settings.ignored {
        log::warn!("{note}");
    }
    log::info!("#Start main() {settings:?}");

    let cli = CommandLine::parse_args();
    match run(&cli, &settings) {
        Ok(report) => {
            for note in &report.warnings {
                eprintln!("{}", warning(note));
            }
            println!("{}", report.stdout);
            Ok(())
        }
        Err(e) => {
            log::error!("ERR {e}");
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(1);
        }
    }
}
