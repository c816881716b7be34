//! WOFF 1.0 container decoding.
//!
//! The tables are inflated and written back into a plain sfnt so the regular
//! parser can read them.
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::{
    error::{FontError, Result},
    font::WOFF_SIGNATURE,
};

const HEADER_LEN: usize = 44;
const WOFF_ENTRY_LEN: usize = 20;
const SFNT_HEADER_LEN: usize = 12;
const SFNT_ENTRY_LEN: usize = 16;

struct TableEntry {
    tag: u32,
    offset: usize,
    comp_length: usize,
    orig_length: usize,
    checksum: u32,
}

/// Converts a WOFF file into the sfnt it wraps.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.len() < HEADER_LEN || &bytes[0..4] != WOFF_SIGNATURE {
        return Err(FontError::Woff("missing wOFF header".into()));
    }
    let flavor = read_u32(bytes, 4)?;
    let length = read_u32(bytes, 8)? as usize;
    if length != bytes.len() {
        return Err(FontError::Woff(format!(
            "header length {length} does not match file size {}",
            bytes.len()
        )));
    }
    let num_tables = read_u16(bytes, 12)? as usize;

    let mut entries = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let o = HEADER_LEN + i * WOFF_ENTRY_LEN;
        let entry = TableEntry {
            tag: read_u32(bytes, o)?,
            offset: read_u32(bytes, o + 4)? as usize,
            comp_length: read_u32(bytes, o + 8)? as usize,
            orig_length: read_u32(bytes, o + 12)? as usize,
            checksum: read_u32(bytes, o + 16)?,
        };
        if entry.comp_length > entry.orig_length {
            return Err(FontError::Woff(format!(
                "table {} compressed size exceeds original size",
                tag_name(entry.tag)
            )));
        }
        entries.push(entry);
    }
    entries.sort_by_key(|e| e.tag);

    let mut sfnt = Vec::with_capacity(
        SFNT_HEADER_LEN
            + num_tables * SFNT_ENTRY_LEN
            + entries.iter().map(|e| padded(e.orig_length)).sum::<usize>(),
    );
    let (search_range, entry_selector, range_shift) = search_params(num_tables as u16);
    sfnt.extend_from_slice(&flavor.to_be_bytes());
    sfnt.extend_from_slice(&(num_tables as u16).to_be_bytes());
    sfnt.extend_from_slice(&search_range.to_be_bytes());
    sfnt.extend_from_slice(&entry_selector.to_be_bytes());
    sfnt.extend_from_slice(&range_shift.to_be_bytes());

    let mut data_offset = SFNT_HEADER_LEN + num_tables * SFNT_ENTRY_LEN;
    let mut tables = Vec::with_capacity(num_tables);
    for entry in &entries {
        let data = table_data(bytes, entry)?;
        sfnt.extend_from_slice(&entry.tag.to_be_bytes());
        sfnt.extend_from_slice(&entry.checksum.to_be_bytes());
        sfnt.extend_from_slice(&(data_offset as u32).to_be_bytes());
        sfnt.extend_from_slice(&(entry.orig_length as u32).to_be_bytes());
        data_offset += padded(data.len());
        tables.push(data);
    }
    for data in tables {
        let len = data.len();
        sfnt.extend_from_slice(&data);
        sfnt.resize(sfnt.len() + padded(len) - len, 0);
    }
    log::debug!("decoded WOFF with {num_tables} tables into {} bytes", sfnt.len());
    Ok(sfnt)
}

fn table_data(bytes: &[u8], entry: &TableEntry) -> Result<Vec<u8>> {
    let raw = bytes
        .get(entry.offset..entry.offset + entry.comp_length)
        .ok_or_else(|| {
            FontError::Woff(format!("table {} outside file", tag_name(entry.tag)))
        })?;
    if entry.comp_length == entry.orig_length {
        return Ok(raw.to_vec());
    }
    let mut data = Vec::with_capacity(entry.orig_length);
    ZlibDecoder::new(raw)
        .take(entry.orig_length as u64 + 1)
        .read_to_end(&mut data)
        .map_err(|e| FontError::Woff(format!("inflate {}: {e}", tag_name(entry.tag))))?;
    if data.len() != entry.orig_length {
        return Err(FontError::Woff(format!(
            "table {} inflated to {} bytes, expected {}",
            tag_name(entry.tag),
            data.len(),
            entry.orig_length
        )));
    }
    Ok(data)
}

fn search_params(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = num_tables * 16 - search_range;
    (search_range, entry_selector, range_shift)
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn tag_name(tag: u32) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).into_owned()
}

fn read_u32(bytes: &[u8], o: usize) -> Result<u32> {
    bytes
        .get(o..o + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_be_bytes)
        .ok_or_else(|| FontError::Woff(format!("truncated at offset {o}")))
}

fn read_u16(bytes: &[u8], o: usize) -> Result<u16> {
    bytes
        .get(o..o + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_be_bytes)
        .ok_or_else(|| FontError::Woff(format!("truncated at offset {o}")))
}
