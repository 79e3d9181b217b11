use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use transition::{FitMode, TransitionStyle};

#[derive(Parser, Debug)]
#[command(
    name = "fadeshow",
    author,
    version,
    about = "Image slideshow with GPU transitions",
    arg_required_else_help = false
)]
pub struct Args {
    /// Images to show, as local paths or `http(s)://` / `file://` URLs.
    #[arg(value_name = "IMAGES")]
    pub images: Vec<String>,

    /// Slideshow config file; defaults to `fadeshow.toml` in the user config dir.
    #[arg(long, value_name = "PATH", env = "FADESHOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Transition program: `split`, `fade`, or `noise`.
    #[arg(long, value_name = "NAME", value_parser = parse_transition)]
    pub transition: Option<TransitionStyle>,

    /// How images fill the window: `cover` or `contain`.
    #[arg(long, value_name = "MODE", value_parser = parse_fit)]
    pub fit: Option<FitMode>,

    /// Transition length in milliseconds.
    #[arg(long, value_name = "N")]
    pub duration_ms: Option<u64>,

    /// Always run transitions forward instead of alternating direction.
    #[arg(long)]
    pub no_toggle: bool,

    /// Advance automatically after this interval (e.g. `8s`, `1m`).
    #[arg(long, value_name = "DURATION", value_parser = parse_autoplay)]
    pub autoplay: Option<Duration>,

    /// Initial window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_transition(value: &str) -> Result<TransitionStyle, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("transition name must not be empty".to_string());
    }
    TransitionStyle::from_name(trimmed)
        .ok_or_else(|| format!("unknown transition '{trimmed}'; expected split, fade, or noise"))
}

pub fn parse_fit(value: &str) -> Result<FitMode, String> {
    let trimmed = value.trim();
    FitMode::from_name(trimmed)
        .ok_or_else(|| format!("unknown fit mode '{trimmed}'; expected cover or contain"))
}

pub fn parse_autoplay(value: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(value.trim())
        .map_err(|err| format!("invalid autoplay interval '{value}': {err}"))?;
    if interval.is_zero() {
        return Err("autoplay interval must be greater than zero".to_string());
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "fadeshow",
            "a.png",
            "b.jpg",
            "--transition",
            "Noise",
            "--fit",
            "contain",
            "--duration-ms",
            "750",
            "--no-toggle",
            "--autoplay",
            "5s",
            "--size",
            "640x480",
        ])
        .expect("arguments parse");

        assert_eq!(args.images, vec!["a.png", "b.jpg"]);
        assert_eq!(args.transition, Some(TransitionStyle::Noise));
        assert_eq!(args.fit, Some(FitMode::Contain));
        assert_eq!(args.duration_ms, Some(750));
        assert!(args.no_toggle);
        assert_eq!(args.autoplay, Some(Duration::from_secs(5)));
        assert_eq!(args.size.as_deref(), Some("640x480"));
    }

    #[test]
    fn rejects_unknown_transition() {
        assert!(parse_transition("wipe").is_err());
        assert!(parse_transition("  ").is_err());
        assert_eq!(parse_transition(" fade "), Ok(TransitionStyle::Fade));
    }

    #[test]
    fn rejects_zero_autoplay() {
        assert!(parse_autoplay("0s").is_err());
        assert!(parse_autoplay("soon").is_err());
        assert_eq!(parse_autoplay("1m"), Ok(Duration::from_secs(60)));
    }
}
