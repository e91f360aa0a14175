use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "catalog-browser", version, about = "Podcast catalog TUI")]
pub struct CliArgs {
    /// Print catalog stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the catalog location (file path or http(s) URL)
    #[arg(long, value_name = "PATH_OR_URL")]
    pub catalog: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(catalog) = &self.catalog {
            std::env::set_var("CATALOG_SOURCE", catalog);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
