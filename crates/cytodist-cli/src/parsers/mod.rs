//! Parsers for command-line argument values.

use cytodist_core::models::AnalysisKind;

/// Parse an analysis name from the command line.
///
/// Accepts the full snake_case names used in config files plus short
/// aliases.
pub fn parse_analysis_kind(value: &str) -> Result<AnalysisKind, String> {
    match value.to_lowercase().replace('-', "_").as_str() {
        "droplet_area" | "area" => Ok(AnalysisKind::DropletArea),
        "nucleus_distance" | "nucleus" => Ok(AnalysisKind::NucleusDistance),
        "mitochondria_distance" | "mitochondria" | "mito" => {
            Ok(AnalysisKind::MitochondriaDistance)
        }
        "microtubule_distance" | "microtubule" | "tubule" => {
            Ok(AnalysisKind::MicrotubuleDistance)
        }
        _ => Err(format!(
            "Unknown analysis '{}'. Valid values: droplet_area, nucleus_distance, \
             mitochondria_distance, microtubule_distance",
            value
        )),
    }
}
