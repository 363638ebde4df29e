use serde::Serialize;
use std::path::PathBuf;

use cytodist_core::channels::extract_channel;
use cytodist_core::labeling::label_components;
use cytodist_core::segmentation::{binarize, otsu_threshold};
use cytodist_core::Connectivity;

/// Inspection result structure for JSON output.
#[derive(Serialize)]
pub struct InspectionResult {
    pub file: String,
    pub dimensions: [u32; 2],
    pub channels: u8,
    pub channel_stats: Vec<ChannelStat>,
}

/// Per-channel intensity statistics and segmentation preview.
#[derive(Serialize)]
pub struct ChannelStat {
    pub channel: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub otsu_threshold: f64,
    pub foreground_pixels: usize,
    pub object_count: usize,
}

/// Execute the inspect command: decode one image and print per-channel
/// statistics plus a segmentation preview (threshold, foreground pixel count,
/// raw object count before size filtering). Useful for checking which channel
/// holds which stain before a batch run.
pub fn cmd_inspect(input: PathBuf, json_output: bool) -> Result<(), String> {
    let decoded = cytodist_core::decoders::decode_image(&input).map_err(|e| e.to_string())?;

    let mut channel_stats = Vec::new();
    for channel in 0..decoded.channels as usize {
        let plane = extract_channel(&decoded, channel).map_err(|e| e.to_string())?;

        let mut min = f32::MAX;
        let mut max = f32::MIN;
        let mut sum = 0.0f64;
        for &v in &plane.data {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
        }
        let mean = (sum / plane.len() as f64) as f32;

        let threshold = otsu_threshold(&plane);
        let mask = binarize(&plane, threshold);
        let components = label_components(&mask, Connectivity::Eight);

        channel_stats.push(ChannelStat {
            channel,
            min,
            max,
            mean,
            otsu_threshold: threshold,
            foreground_pixels: mask.foreground_count(),
            object_count: components.len(),
        });
    }

    let result = InspectionResult {
        file: input.display().to_string(),
        dimensions: [decoded.width, decoded.height],
        channels: decoded.channels,
        channel_stats,
    };

    if json_output {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize inspection: {}", e))?;
        println!("{}", json);
    } else {
        println!("Inspecting: {}\n", input.display());

        println!("Image Info:");
        println!("  Dimensions: {}x{}", decoded.width, decoded.height);
        println!("  Channels: {}", decoded.channels);

        println!("\nPer-Channel Statistics:");
        for stat in &result.channel_stats {
            println!(
                "  Channel {}: min={:.4}, max={:.4}, mean={:.4}",
                stat.channel, stat.min, stat.max, stat.mean
            );
            println!(
                "    Otsu threshold: {:.4}, foreground: {} px, objects: {}",
                stat.otsu_threshold, stat.foreground_pixels, stat.object_count
            );
        }
    }

    Ok(())
}
