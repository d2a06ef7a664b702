//! XMLTV generator
//! Renders the decoded CW feed as an XMLTV document - all channel
//! elements first, then programme entries referencing them by slug

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::escape::escape;

use crate::models::{CwFeed, CwProgram};

/// Value of generator-info-name on the <tv> root element
const GENERATOR_NAME: &str = "cwtv_epg";

/// Cap on stored skip diagnostics (every skip is still counted)
const MAX_SKIP_MESSAGES: usize = 50;

/// A rendered XMLTV document plus conversion statistics
#[derive(Debug, Clone, Default)]
pub struct XmltvGuide {
    /// The document text, UTF-8, 2-space indented
    pub xml: String,
    /// Number of <channel> elements emitted
    pub channel_count: usize,
    /// Number of <programme> elements emitted
    pub programme_count: usize,
    /// Diagnostics for programmes dropped over unusable timestamps
    pub skipped: Vec<String>,
    /// Total number of dropped programmes
    pub skipped_count: usize,
}

/// Converts a CW feed into XMLTV text and writes it out
pub struct XmltvGenerator;

impl XmltvGenerator {
    /// Render the whole feed. Programmes whose timestamps do not parse
    /// are skipped and recorded in the returned statistics; everything
    /// else is carried through verbatim, XML-escaped.
    pub fn generate(feed: &CwFeed) -> XmltvGuide {
        let mut guide = XmltvGuide::default();
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<tv generator-info-name=\"{}\">\n", GENERATOR_NAME));

        // Channel ids must be declared before programmes reference them
        for channel in &feed.channels {
            xml.push_str(&format!("  <channel id=\"{}\">\n", escape(&channel.slug)));
            xml.push_str(&format!(
                "    <display-name>{}</display-name>\n",
                escape(&channel.title)
            ));
            xml.push_str(&format!(
                "    <icon src=\"{}\"/>\n",
                escape(&channel.icon_unfocused_url)
            ));
            xml.push_str("  </channel>\n");
            guide.channel_count += 1;
        }

        for channel in &feed.channels {
            for program in &channel.programs {
                let (start, stop) = match programme_times(program) {
                    Ok(times) => times,
                    Err(e) => {
                        if guide.skipped.len() < MAX_SKIP_MESSAGES {
                            guide.skipped.push(format!(
                                "invalid time format in channel {}: {} ({})",
                                channel.slug, program.title, e
                            ));
                        }
                        guide.skipped_count += 1;
                        continue;
                    }
                };

                xml.push_str(&format!(
                    "  <programme start=\"{}\" stop=\"{}\" channel=\"{}\">\n",
                    start,
                    stop,
                    escape(&channel.slug)
                ));
                xml.push_str(&format!("    <title>{}</title>\n", escape(&program.title)));
                // Sub-title only when there is something to say
                if !program.subtitle.trim().is_empty() {
                    xml.push_str(&format!(
                        "    <sub-title>{}</sub-title>\n",
                        escape(&program.subtitle)
                    ));
                }
                // Description is always present, empty or not
                xml.push_str(&format!("    <desc>{}</desc>\n", escape(&program.description)));
                xml.push_str("  </programme>\n");
                guide.programme_count += 1;
            }
        }

        xml.push_str("</tv>\n");
        guide.xml = xml;
        guide
    }

    /// Write the document to disk, replacing any previous file at `path`
    pub fn write_file(guide: &XmltvGuide, path: &Path) -> std::io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(guide.xml.as_bytes())?;
        file.flush()
    }
}

/// Convert both timestamps of a programme, failing if either is unusable
fn programme_times(program: &CwProgram) -> Result<(String, String), chrono::ParseError> {
    let start = parse_feed_time(&program.start_time)?;
    let stop = parse_feed_time(&program.end_time)?;
    Ok((format_xmltv_time(start), format_xmltv_time(stop)))
}

/// Parse a feed timestamp. The feed uses RFC 3339 with `Z` or a numeric
/// offset; the occasional offset-less value is taken as UTC.
pub fn parse_feed_time(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let value = value.trim();
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| e),
    }
}

/// Format a UTC instant in the fixed-width XMLTV form,
/// e.g. "20240101003000 +0000"
pub fn format_xmltv_time(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%d%H%M%S %z").to_string()
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
