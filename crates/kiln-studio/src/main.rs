mod geometry;
mod viewer;

use anyhow::Result;
use kiln_engine::device::GpuInit;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::pipeline::VertexVariant;

use viewer::{Viewer, ViewerConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let variant = parse_variant(std::env::args().skip(1))?;
    let config = ViewerConfig {
        variant,
        ..ViewerConfig::default()
    };

    log::info!("starting kiln studio ({variant:?} vertices)");
    Viewer::run(config, GpuInit::default())
}

fn parse_variant(args: impl Iterator<Item = String>) -> Result<VertexVariant> {
    let mut variant = VertexVariant::Full;
    for arg in args {
        match arg.as_str() {
            "--position-only" => variant = VertexVariant::PositionOnly,
            "--full" => variant = VertexVariant::Full,
            other => anyhow::bail!("unknown argument `{other}` (expected --full or --position-only)"),
        }
    }
    Ok(variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn full_is_the_default() {
        assert_eq!(parse_variant(args(&[])).unwrap(), VertexVariant::Full);
    }

    #[test]
    fn position_only_flag() {
        assert_eq!(
            parse_variant(args(&["--position-only"])).unwrap(),
            VertexVariant::PositionOnly
        );
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_variant(args(&["--wireframe"])).is_err());
    }
}
