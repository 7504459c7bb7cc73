//! Canonical resource paths.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{Error, Result};

/// AsciiSet for item names with `/` escaped.
///
/// Every byte except the unreserved characters `A-Z a-z 0-9 - . _ ~` is encoded.
pub static ITEM_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for item names that keep `/` as a path separator.
pub static ITEM_ENCODE_SET_KEEP_SLASH: AsciiSet = ITEM_ENCODE_SET.remove(b'/');

/// How `/` inside an item name is written into the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyEscape {
    /// `logs/2024.txt` becomes `logs%2F2024.txt`.
    EncodeSlash,
    /// `logs/2024.txt` stays `logs/2024.txt`.
    #[default]
    PreserveSlash,
}

impl KeyEscape {
    fn encode_set(self) -> &'static AsciiSet {
        match self {
            KeyEscape::EncodeSlash => &ITEM_ENCODE_SET,
            KeyEscape::PreserveSlash => &ITEM_ENCODE_SET_KEEP_SLASH,
        }
    }
}

/// Sub-resources that stay in the signed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubResource {
    /// Access control list.
    Acl,
    /// BitTorrent file of an object.
    Torrent,
}

impl SubResource {
    /// The query marker of this sub-resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubResource::Acl => "acl",
            SubResource::Torrent => "torrent",
        }
    }
}

/// Build the canonical path for a resource.
///
/// - no collection: `/`
/// - collection only: `/collection`
/// - collection and item: `/collection/<encoded item>`
///
/// A sub-resource appends `?acl` or `?torrent`. Caller supplied query
/// parameters never appear here.
pub fn build_path(
    collection: Option<&str>,
    item: Option<&str>,
    subresource: Option<SubResource>,
    escape: KeyEscape,
) -> Result<String> {
    let item = item.filter(|v| !v.is_empty());

    let mut path = match collection {
        None => {
            if item.is_some() {
                return Err(Error::request_invalid(
                    "resource item requires a resource collection",
                ));
            }
            "/".to_string()
        }
        Some(collection) => {
            check_collection(collection)?;

            let mut path = format!("/{collection}");
            if let Some(item) = item {
                path.push('/');
                path.extend(utf8_percent_encode(item, escape.encode_set()));
            }
            path
        }
    };

    if let Some(sub) = subresource {
        path.push('?');
        path.push_str(sub.as_str());
    }

    Ok(path)
}

fn check_collection(collection: &str) -> Result<()> {
    if collection.is_empty() {
        return Err(Error::encoding_invalid("resource collection must not be empty"));
    }
    // Collections are sent verbatim, so only unreserved characters are allowed.
    if let Some(c) = collection
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')))
    {
        return Err(Error::encoding_invalid(format!(
            "resource collection {collection:?} contains {c:?} which can't be part of a path segment"
        )));
    }
    Ok(())
}
