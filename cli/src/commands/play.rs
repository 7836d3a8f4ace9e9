//! Scripted navigation playback

use crate::output;
use crate::runtime::Driver;
use anyhow::Result;
use folio_core::SiteConfig;
use std::io::Write;
use std::time::Duration;
use tracing::info;

/// Navigate to each path in turn, `gap` apart, then let animations settle
pub async fn play_command(config: &SiteConfig, paths: Vec<String>, gap: Duration) -> Result<()> {
    let mut stdout = std::io::stdout();
    play(config, &paths, gap, &mut stdout).await
}

/// Playback against any writer
pub async fn play<W: Write>(
    config: &SiteConfig,
    paths: &[String],
    gap: Duration,
    out: &mut W,
) -> Result<()> {
    info!(steps = paths.len(), ?gap, "Playing navigation");
    let mut driver = Driver::new(config)?;
    driver.flush(out)?;

    for (i, path) in paths.iter().enumerate() {
        driver.navigate(path);
        driver.flush(out)?;
        if i + 1 < paths.len() {
            driver.advance(gap).await;
            driver.flush(out)?;
        }
    }

    driver.settle().await;
    driver.flush(out)?;
    writeln!(out, "state: {}", output::describe_state(&driver.state()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(paths: &[&str], gap_ms: u64) -> String {
        let paths: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        let mut out = Vec::new();
        play(&SiteConfig::default(), &paths, Duration::from_millis(gap_ms), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_settles_on_last_path() {
        let text = render(&["/about", "/missing", "/"], 1_000).await;
        assert!(text.ends_with("state: idle(hero)\n"));
        assert!(text.contains("not-found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_play_cancels() {
        let text = render(&["/about", "/skills"], 50).await;
        assert!(text.contains("cancel"));
        assert!(text.ends_with("state: idle(skills)\n"));
    }
}
