use plume_common::load_content;

use crate::domain::check::Check;
use crate::infrastructure::settings::Settings;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod domain;
pub mod infrastructure;

fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let content = load_content(&settings.content_path)?;
    println!("Content loaded");

    let report = Check::new(content).run();
    println!("{} entries valid", report.valid);

    for entry in &report.invalid {
        println!("{}:", entry.label);
        for violation in &entry.violations {
            println!("  - {violation}");
        }
    }

    if !report.invalid.is_empty() {
        anyhow::bail!(
            "{} entries failed front-matter validation",
            report.invalid.len()
        );
    }
    Ok(())
}
