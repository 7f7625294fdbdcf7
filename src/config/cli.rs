use crate::core::submission::FormKind;
use crate::domain::model::Theme;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "enquiry-mailer")]
#[command(about = "Send website enquiries to the mail relay")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "enquiry-mailer.toml")]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit one enquiry through a form handler
    Send {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        message: Option<String>,

        /// Which form handler processes the submission
        #[arg(long, value_enum, default_value = "contact")]
        form: FormKind,

        /// Element id of the form (defaults to `contactForm` / `heroForm`)
        #[arg(long)]
        form_id: Option<String>,

        /// URL of the page the form lives on; omit for an origin-less context
        #[arg(long)]
        page_url: Option<String>,

        /// Override the configured form timeout
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Read or change the persisted theme flag
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set {
        #[arg(value_parser = parse_theme)]
        theme: Theme,
    },
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse::<Theme>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send() {
        let cli = CliConfig::try_parse_from([
            "enquiry-mailer",
            "send",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--message",
            "Hello",
            "--form",
            "hero",
            "--page-url",
            "https://vartiss.com/",
        ])
        .unwrap();

        assert_eq!(cli.config, "enquiry-mailer.toml");
        match cli.command {
            Command::Send {
                name, form, page_url, phone, ..
            } => {
                assert_eq!(name.as_deref(), Some("Ada"));
                assert_eq!(form, FormKind::Hero);
                assert_eq!(page_url.as_deref(), Some("https://vartiss.com/"));
                assert_eq!(phone, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_theme_set() {
        let cli = CliConfig::try_parse_from(["enquiry-mailer", "-v", "theme", "set", "light"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: ThemeAction::Set { theme: Theme::Light }
            }
        ));

        assert!(CliConfig::try_parse_from(["enquiry-mailer", "theme", "set", "blue"]).is_err());
    }
}
