//! Plain-text rendering of the album list, its footer, and album details

use std::io::{self, Write};

use crate::graphql::Album;
use crate::pagination::{CollectionState, FetchStatus};

pub const LOAD_MORE_TEXT: &str = "Load more...";
pub const END_OF_LIST_TEXT: &str = "You reached the end";

/// Footer shown under the list; empty while a request is in flight
pub fn footer(status: FetchStatus, has_more: bool) -> &'static str {
    if status.is_busy() {
        ""
    } else if has_more {
        LOAD_MORE_TEXT
    } else {
        END_OF_LIST_TEXT
    }
}

pub fn album_line(index: usize, album: &Album) -> String {
    format!("{:>4}. [{}] {}", index + 1, album.id, album.title)
}

/// Write albums `from..` of the collection, numbered from one
pub fn write_albums<W: Write>(
    out: &mut W,
    state: &CollectionState<Album>,
    from: usize,
) -> io::Result<()> {
    for (index, album) in state.items.iter().enumerate().skip(from) {
        writeln!(out, "{}", album_line(index, album))?;
    }
    Ok(())
}

pub fn write_footer<W: Write>(
    out: &mut W,
    state: &CollectionState<Album>,
    status: FetchStatus,
    has_more: bool,
) -> io::Result<()> {
    let total = state
        .meta
        .and_then(|m| m.total_count)
        .map(|t| format!(" of {}", t))
        .unwrap_or_default();
    writeln!(out, "-- {} albums{} -- {}", state.items.len(), total, footer(status, has_more))
}

pub fn write_album_detail<W: Write>(out: &mut W, album: &Album) -> io::Result<()> {
    writeln!(out, "{}", album.title)?;
    writeln!(out, "  id:        {}", album.id)?;
    writeln!(out, "  photos:    {}", album.photo_count())?;
    writeln!(out, "  thumbnail: {}", album.cover_thumbnail().unwrap_or("-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::{Photo, PhotoList};
    use crate::pagination::{LinkSet, PageMeta};

    fn album(id: &str, title: &str) -> Album {
        Album {
            id: id.to_string(),
            title: title.to_string(),
            photos: PhotoList {
                data: vec![Photo {
                    id: "1".to_string(),
                    title: "cover".to_string(),
                    url: "https://img/600".to_string(),
                    thumbnail_url: "https://img/150".to_string(),
                }],
            },
        }
    }

    #[test]
    fn test_footer_text() {
        assert_eq!(footer(FetchStatus::Idle, true), LOAD_MORE_TEXT);
        assert_eq!(footer(FetchStatus::Idle, false), END_OF_LIST_TEXT);
        assert_eq!(footer(FetchStatus::Loading, true), "");
    }

    #[test]
    fn test_write_albums_from_offset() {
        let state = CollectionState {
            items: vec![album("1", "first"), album("2", "second")],
            links: LinkSet::default(),
            meta: Some(PageMeta {
                total_count: Some(100),
            }),
        };
        let mut out = Vec::new();

        write_albums(&mut out, &state, 1).unwrap();
        write_footer(&mut out, &state, FetchStatus::Idle, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("first"));
        assert!(text.contains("   2. [2] second"));
        assert!(text.contains("-- 2 albums of 100 -- Load more..."));
    }

    #[test]
    fn test_album_detail() {
        let mut out = Vec::new();
        write_album_detail(&mut out, &album("7", "seventh")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("seventh\n"));
        assert!(text.contains("thumbnail: https://img/150"));
    }
}
