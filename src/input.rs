//! Provides a means to read, parse and hold configuration options for scans.
use anyhow::Context;
use clap::Parser;
use serde_derive::Deserialize;
use std::fs;
use std::path::PathBuf;

const DEFAULT_RESULTS_FILE: &str = "last_results.json";
const DEFAULT_REPORT_DIR: &str = "reports";
const CONFIG_FILE_NAME: &str = ".cybereye.toml";

/// Parses a number of seconds given on the command line.
fn parse_seconds(input: &str) -> Result<u64, String> {
    let seconds: u64 = input
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number of seconds '{input}'"))?;

    if seconds == 0 {
        return Err(String::from("Duration must be at least 1 second"));
    }

    Ok(seconds)
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "cybereye",
    version = env!("CARGO_PKG_VERSION"),
    max_term_width = 120,
    help_template = "{bin} {version}\n{about}\n\nUSAGE:\n    {usage}\n\nOPTIONS:\n{options}",
)]
#[allow(clippy::struct_excessive_bools)]
/// Username reconnaissance across social platforms.
/// Probes public profile pages only. Results favour recall: a page that
/// does not look like an error page is reported as found.
pub struct Opts {
    /// The username to search for.
    #[arg(required_unless_present = "from_last")]
    pub username: Option<String>,

    /// Whether to ignore the configuration file or not.
    #[arg(short, long)]
    pub no_config: bool,

    /// Hide the banner
    #[arg(long)]
    pub no_banner: bool,

    /// Custom path to config file
    #[arg(short, long, value_parser)]
    pub config_path: Option<PathBuf>,

    /// Greppable mode. Only output the found profile URLs.
    #[arg(short, long)]
    pub greppable: bool,

    /// Accessible mode. Turns off features which negatively affect screen readers.
    #[arg(long)]
    pub accessible: bool,

    /// How many platforms are probed at the same time.
    #[arg(short, long, default_value = "64")]
    pub batch_size: u16,

    /// The timeout in seconds before a platform is assumed to have no profile.
    #[arg(short, long, default_value = "15", value_parser = parse_seconds)]
    pub timeout: u64,

    /// The number of tries for a platform that times out.
    /// If set to 0, cybereye will correct it to 1.
    #[arg(long, default_value = "1")]
    pub tries: u8,

    /// Upper bound in seconds for the whole scan. Unset means no bound.
    #[arg(short, long, value_parser = parse_seconds)]
    pub deadline: Option<u64>,

    /// A list of comma separated platforms to skip. Example: Facebook,LinkedIn.
    #[arg(short, long, value_delimiter = ',')]
    pub exclude_platforms: Option<Vec<String>>,

    /// Write an HTML report after the scan.
    #[arg(long)]
    pub html: bool,

    /// Directory HTML reports are written to.
    #[arg(long, default_value = DEFAULT_REPORT_DIR)]
    pub report_dir: PathBuf,

    /// File the latest scan is saved to and read back from.
    #[arg(long, default_value = DEFAULT_RESULTS_FILE)]
    pub results_file: PathBuf,

    /// Do not save this scan as the latest result.
    #[arg(long)]
    pub no_save: bool,

    /// Skip scanning and build the HTML report from the latest saved scan.
    #[arg(long, conflicts_with = "username")]
    pub from_last: bool,
}

#[cfg(not(tarpaulin_include))]
impl Opts {
    /// Reads the command line arguments.
    pub fn read() -> Self {
        Self::parse()
    }

    /// Merges values found within the user configuration file into the
    /// command line options, unless `--no-config` was given.
    pub fn merge(&mut self, config: &Config) {
        if !self.no_config {
            self.merge_required(config);
            self.merge_optional(config);
        }
    }

    fn merge_required(&mut self, config: &Config) {
        macro_rules! merge_required {
            ($($field: ident),+) => {
                $(
                    if let Some(e) = &config.$field {
                        self.$field = e.clone();
                    }
                )+
            }
        }

        merge_required!(
            greppable,
            accessible,
            batch_size,
            timeout,
            tries,
            html,
            report_dir,
            results_file
        );
    }

    fn merge_optional(&mut self, config: &Config) {
        macro_rules! merge_optional {
            ($($field: ident),+) => {
                $(
                    if config.$field.is_some() {
                        self.$field = config.$field.clone();
                    }
                )+
            }
        }

        merge_optional!(deadline, exclude_platforms);
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            username: None,
            no_config: true,
            no_banner: false,
            config_path: None,
            greppable: true,
            accessible: false,
            batch_size: 0,
            timeout: 0,
            tries: 0,
            deadline: None,
            exclude_platforms: None,
            html: false,
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
            no_save: false,
            from_last: false,
        }
    }
}

/// Struct used to deserialize the options specified within our config file.
/// These will be further merged with our command line arguments in order to
/// generate the final Opts struct.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    greppable: Option<bool>,
    accessible: Option<bool>,
    batch_size: Option<u16>,
    timeout: Option<u64>,
    tries: Option<u8>,
    deadline: Option<u64>,
    exclude_platforms: Option<Vec<String>>,
    html: Option<bool>,
    report_dir: Option<PathBuf>,
    results_file: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration file with TOML format and parses it into a
    /// Config struct. A missing file is an empty configuration.
    ///
    /// # Format
    ///
    /// timeout = 10
    /// tries = 2
    /// deadline = 60
    /// exclude_platforms = ["Facebook", "LinkedIn"]
    /// html = true
    /// report_dir = "reports"
    ///
    pub fn read(custom_config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = match custom_config_path {
            Some(path) => path,
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Could not read {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid {}", config_path.display()))
    }

    /// Parses TOML configuration text.
    ///
    /// Durations hold the same bounds as on the command line, so a zero
    /// `timeout` or `deadline` is rejected here rather than merged.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (field, seconds) in [("timeout", self.timeout), ("deadline", self.deadline)] {
            if seconds == Some(0) {
                anyhow::bail!("{field} = 0: duration must be at least 1 second");
            }
        }
        Ok(())
    }
}

/// Constructs default path to config toml, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    let mut config_path = dirs::home_dir()?;
    config_path.push(CONFIG_FILE_NAME);
    Some(config_path)
}
