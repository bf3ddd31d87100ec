use csv::ReaderBuilder;
use std::{
    collections::HashMap,
    fs::File,
    io::{self, Read},
    path::Path,
};
use tracing::debug;

/// Number of leading bytes inspected when sniffing.
pub const SAMPLE_BYTES: usize = 2048;

pub const DEFAULT_DELIMITER: u8 = b',';

/// Delimiters the sniffer recognises, in tie-break order.
pub const CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Infer the field delimiter of the file at `path` from its first
/// [`SAMPLE_BYTES`] bytes. Every failure (unreadable file, undecodable
/// sample, no plausible candidate) collapses to `default`.
pub fn detect_delimiter<P: AsRef<Path>>(path: P, default: u8) -> u8 {
    let path = path.as_ref();
    let sample = match read_sample(path) {
        Ok(s) => s,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "sample unreadable, using default delimiter");
            return default;
        }
    };

    match sniff_bytes(&sample) {
        Some(d) => {
            debug!(path = %path.display(), delimiter = %delimiter_name(d), "sniffed delimiter");
            d
        }
        None => {
            debug!(
                path = %path.display(),
                default = %delimiter_name(default),
                "no delimiter detected, using default"
            );
            default
        }
    }
}

fn read_sample(path: &Path) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(SAMPLE_BYTES);
    File::open(path)?
        .take(SAMPLE_BYTES as u64)
        .read_to_end(&mut buf)?;
    Ok(buf)
}

/// Pick the candidate delimiter that splits `sample` into the most uniform table.
///
/// A candidate is viable when its most common field count is greater than one.
/// Viable candidates are ranked by the share of records having that field count;
/// ties go to the earlier entry in [`CANDIDATES`].
pub fn sniff_bytes(sample: &[u8]) -> Option<u8> {
    let text = decode_sample(sample)?;
    let text = drop_partial_line(text, sample.len() >= SAMPLE_BYTES);
    if text.trim().is_empty() {
        return None;
    }

    let mut best: Option<(u8, f64)> = None;
    for &candidate in &CANDIDATES {
        let Some(score) = uniformity(text, candidate) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, current)) => score > current,
        };
        if better {
            best = Some((candidate, score));
        }
    }
    best.map(|(d, _)| d)
}

fn decode_sample(sample: &[u8]) -> Option<&str> {
    match std::str::from_utf8(sample) {
        Ok(s) => Some(s),
        // the sample boundary cut a multi-byte character in half
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&sample[..e.valid_up_to()]).ok(),
        Err(_) => None,
    }
}

/// A full sample most likely ends mid-line; keep only complete lines when there are any.
fn drop_partial_line(text: &str, truncated: bool) -> &str {
    if !truncated || text.ends_with('\n') {
        return text;
    }
    match text.rfind('\n') {
        Some(idx) => &text[..=idx],
        None => text,
    }
}

/// Share of records with the most common field count, or `None` when that
/// count is one (the delimiter does not occur).
fn uniformity(text: &str, delimiter: u8) -> Option<f64> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut counts: HashMap<usize, usize> = HashMap::new();
    let mut total = 0usize;
    for record in rdr.records() {
        let record = record.ok()?;
        *counts.entry(record.len()).or_default() += 1;
        total += 1;
    }

    let (fields, freq) = counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))?;
    if fields <= 1 {
        return None;
    }

    Some(freq as f64 / total as f64)
}

/// Human readable name for a delimiter byte.
pub fn delimiter_name(d: u8) -> String {
    match d {
        b',' => "comma".to_string(),
        b'\t' => "tab".to_string(),
        b'|' => "pipe".to_string(),
        b';' => "semicolon".to_string(),
        other => format!("{:?}", other as char),
    }
}
