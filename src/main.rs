use clap::Parser;
use enquiry_mailer::config::{Command, ThemeAction};
use enquiry_mailer::core::submission::CONTACT_FORM_ID;
use enquiry_mailer::utils::{logger, validation::Validate};
use enquiry_mailer::{
    wire_form, CliConfig, ExecutionContext, FormKind, LocalSettingsStore, MailClient, MailConfig,
    MemoryForm, Settings, StdoutNotifier, SubmissionState,
};
use std::sync::Arc;
use std::time::Duration;

const HERO_FORM_ID: &str = "heroForm";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match MailConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting enquiry-mailer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match cli.command {
        Command::Send {
            name,
            email,
            phone,
            message,
            form,
            form_id,
            page_url,
            timeout_ms,
        } => {
            let context = match page_url.as_deref().map(ExecutionContext::from_url) {
                Some(Ok(context)) => context,
                Some(Err(e)) => {
                    eprintln!("❌ {}", e.user_friendly_message());
                    std::process::exit(1);
                }
                None => ExecutionContext::detached(),
            };

            let form_id = form_id.unwrap_or_else(|| match form {
                FormKind::Contact => CONTACT_FORM_ID.to_string(),
                FormKind::Hero => HERO_FORM_ID.to_string(),
            });
            let timeout = timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.form_timeout());

            let client = Arc::new(MailClient::from_config(&config));
            tracing::info!(
                "📡 Using endpoint {}",
                client.endpoints().select(&context)
            );

            // 以 --form 決定處理方式，--form-id 只是掛載位置
            let registry = wire_form(client, &form_id, form, timeout);
            let enquiry_form = MemoryForm::new(Some(form_id.clone()))
                .with_field("name", name)
                .with_field("email", email)
                .with_field("phone", phone)
                .with_field("message", message);

            let state = registry
                .dispatch_submit(&form_id, &enquiry_form, &StdoutNotifier, &context)
                .await;

            // 根據結果決定退出碼
            let exit_code = match state {
                Some(SubmissionState::Succeeded) => 0,
                Some(SubmissionState::Aborted) => 2,
                Some(other) => {
                    tracing::debug!("Submission ended as {}", other.name());
                    1
                }
                None => {
                    eprintln!("❌ No form handler attached to '{}'", form_id);
                    1
                }
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
        Command::Theme { action } => {
            let store = LocalSettingsStore::new(config.settings.path.clone());
            let mut settings = Settings::load(&store).await?;

            match action {
                ThemeAction::Show => {}
                ThemeAction::Toggle => {
                    settings.toggle(&store).await?;
                }
                ThemeAction::Set { theme } => {
                    settings.theme = theme;
                    settings.save(&store).await?;
                }
            }

            println!("{}", settings.theme);
        }
    }

    Ok(())
}
