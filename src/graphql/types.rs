//! Album records and the wire shapes of the albums API

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::errors::{GraphqlError, GraphqlResult};
use crate::pagination::{LinkSet, Page, PageMeta, PageRequest};

pub const ALBUMS_QUERY: &str = r#"
fragment PageLimitPair on PageLimitPair {
  page
  limit
}

fragment PaginationLinks on PaginationLinks {
  first { ...PageLimitPair }
  prev { ...PageLimitPair }
  next { ...PageLimitPair }
  last { ...PageLimitPair }
}

fragment Album on Album {
  id
  title
  photos {
    data {
      id
      title
      url
      thumbnailUrl
    }
  }
}

query Albums($options: PageQueryOptions) {
  albums(options: $options) {
    data { ...Album }
    links { ...PaginationLinks }
    meta { totalCount }
  }
}
"#;

pub const ALBUM_QUERY: &str = r#"
fragment Album on Album {
  id
  title
  photos {
    data {
      id
      title
      url
      thumbnailUrl
    }
  }
}

query Album($id: ID!) {
  album(id: $id) { ...Album }
}
"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoList {
    #[serde(default)]
    pub data: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub photos: PhotoList,
}

impl Album {
    /// Thumbnail of the first photo, used as the album's cover
    pub fn cover_thumbnail(&self) -> Option<&str> {
        self.photos.data.first().map(|p| p.thumbnail_url.as_str())
    }

    pub fn photo_count(&self) -> usize {
        self.photos.data.len()
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumsData {
    albums: AlbumsPage,
}

#[derive(Debug, Deserialize)]
struct AlbumsPage {
    #[serde(default)]
    data: Vec<Album>,
    #[serde(default)]
    links: Option<LinkSet>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumData {
    album: Option<Album>,
}

impl From<AlbumsData> for Page<Album> {
    fn from(data: AlbumsData) -> Self {
        let AlbumsPage { data, links, meta } = data.albums;
        Page {
            items: data,
            links: links.unwrap_or_default(),
            meta,
        }
    }
}

impl AlbumData {
    pub(crate) fn into_album(self) -> Option<Album> {
        self.album
    }
}

pub fn albums_variables(request: PageRequest) -> Value {
    json!({
        "options": {
            "paginate": {
                "limit": request.limit,
                "page": request.page,
            }
        }
    })
}

pub fn album_variables(id: &str) -> Value {
    json!({ "id": id })
}

/// Decode a GraphQL response body, surfacing the `errors` array as a failure
pub(crate) fn decode_response<D: DeserializeOwned>(body: &str) -> GraphqlResult<D> {
    let response: GraphqlResponse<D> = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(GraphqlError::ApiError(messages.join("; ")));
    }

    response.data.ok_or(GraphqlError::MissingData)
}
