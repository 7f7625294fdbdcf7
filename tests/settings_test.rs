use anyhow::Result;
use enquiry_mailer::core::SettingsStore;
use enquiry_mailer::utils::validation::Validate;
use enquiry_mailer::{LocalSettingsStore, MailConfig, Settings, Theme};
use tempfile::TempDir;
use tokio_test::assert_ok;

#[tokio::test]
async fn test_theme_defaults_to_dark() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = LocalSettingsStore::new(temp_dir.path().to_str().unwrap().to_string());

    let settings = Settings::load(&store).await?;
    assert_eq!(settings.theme, Theme::Dark);
    Ok(())
}

#[tokio::test]
async fn test_toggle_persists_across_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let base = temp_dir.path().join("nested").join("settings");
    let store = LocalSettingsStore::new(base.to_str().unwrap().to_string());

    let mut settings = Settings::load(&store).await?;
    assert_eq!(settings.toggle(&store).await?, Theme::Light);
    assert_eq!(store.get_item("theme").await?.as_deref(), Some("light"));

    // 重新載入應讀到已保存的主題
    let reloaded = Settings::load(&LocalSettingsStore::new(base.to_str().unwrap().to_string())).await?;
    assert_eq!(reloaded.theme, Theme::Light);

    let mut reloaded = reloaded;
    assert_eq!(reloaded.toggle(&store).await?, Theme::Dark);
    assert_eq!(Settings::load(&store).await?.theme, Theme::Dark);
    Ok(())
}

#[tokio::test]
async fn test_unknown_stored_value_falls_back_to_dark() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = LocalSettingsStore::new(temp_dir.path().to_str().unwrap().to_string());

    store.set_item("theme", "sepia").await?;
    store.set_item("other", "kept").await?;

    assert_eq!(Settings::load(&store).await?.theme, Theme::Dark);
    assert_eq!(store.get_item("other").await?.as_deref(), Some("kept"));
    Ok(())
}

#[test]
fn test_config_file_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("enquiry-mailer.toml");
    std::fs::write(
        &path,
        r#"
[endpoints]
local = "http://localhost:5001/send-mail"
production = "https://relay.example.com/send-mail"

[timeouts]
default_ms = 8000
form_ms = 15000

[logging]
json = true

[settings]
path = "/tmp/enquiry"
"#,
    )?;

    let config = MailConfig::load_or_default(&path)?;
    assert_ok!(config.validate());
    assert_eq!(config.endpoints.local, "http://localhost:5001/send-mail");
    assert_eq!(config.timeouts.form_ms, 15_000);
    assert!(config.logging.json);
    assert_eq!(config.settings.path, "/tmp/enquiry");

    let missing = MailConfig::load_or_default(temp_dir.path().join("missing.toml"))?;
    assert_eq!(missing.timeouts.default_ms, 10_000);
    Ok(())
}
