//! CWTV EPG - Rust Edition
//! Fetches the CW landing guide feed and exports it as an XMLTV file

use std::path::Path;
use std::process::exit;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

mod api;
mod epg;
mod models;

use api::FetchError;
use epg::XmltvGenerator;

/// Output document, written into the current working directory
const OUTPUT_PATH: &str = "cwtv_epg.xml";

fn main() {
    init_logging();

    let feed = match api::fetch_guide() {
        Ok(feed) => feed,
        Err(e) => {
            report_fetch_error(&e);
            exit(1);
        }
    };

    log::info!("Guide feed has {} channels", feed.channels.len());

    let guide = XmltvGenerator::generate(&feed);
    if guide.skipped_count > 0 {
        log::warn!(
            "Skipped {} programme(s) with unusable timestamps",
            guide.skipped_count
        );
        for skip in &guide.skipped {
            log::warn!("  {}", skip);
        }
        if guide.skipped_count > guide.skipped.len() {
            log::warn!("  ... and {} more", guide.skipped_count - guide.skipped.len());
        }
    }

    if let Err(e) = XmltvGenerator::write_file(&guide, Path::new(OUTPUT_PATH)) {
        println!("Error: Failed to write {}. Details: {}", OUTPUT_PATH, e);
        exit(1);
    }

    log::info!(
        "Wrote {} channels and {} programmes to {}",
        guide.channel_count,
        guide.programme_count,
        OUTPUT_PATH
    );
    println!("EPG exported successfully");
}

/// Explain the failure and the likely remedy. The endpoint is
/// US-only, so most failures trace back to geoblocking.
fn report_fetch_error(e: &FetchError) {
    match e {
        FetchError::HttpStatus(status) => {
            println!("HTTP Error: {}", status);
            println!("This is likely due to geoblocking. Please use a USA-based VPN and try again.");
        }
        FetchError::Json(e) => {
            log::debug!("JSON decode failed: {}", e);
            println!("Error: Failed to parse JSON response. This is likely due to geoblocking.");
            println!("Please use a USA-based VPN to access the content and try again.");
        }
        FetchError::EmptyGuide => {
            println!("Error: No channels found in the response. The data may be incomplete or restricted.");
            println!("Please ensure you're using a USA-based VPN and try again.");
        }
        FetchError::Network(details) => {
            println!("Error: Failed to fetch data from {}. Details: {}", api::GUIDE_URL, details);
            println!("Please check your internet connection or use a USA-based VPN and try again.");
        }
    }
}

fn init_logging() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let _ = TermLogger::init(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
