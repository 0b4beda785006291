use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AssetError, AssetResult};

/// Icons returned per listing page
pub const ICON_PAGE_SIZE: usize = 24;

/// Filter for the icon listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconQuery {
    pub category: String,
    /// Zero-based page index
    pub page: u32,
    pub search: String,
}

/// Where icon listings and SVG bytes come from.
///
/// Sources backed by asynchronous requests return [`AssetError::Pending`]
/// until the response arrives; callers repeat the call on a later frame.
pub trait AssetSource {
    /// Relative paths of the icons matching `query`
    fn list_icons(&self, query: &IconQuery) -> AssetResult<Vec<String>>;

    /// Raw bytes of the asset at `path`
    fn fetch(&self, path: &str) -> AssetResult<Vec<u8>>;
}

/// HTTP client for the icon listing service, `{base}/icons?category=&page=&search=`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpAssetSource {
    base_url: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpAssetSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn request_error(url: &str, err: ureq::Error) -> AssetError {
        match err {
            ureq::Error::StatusCode(404) => AssetError::NotFound(url.to_owned()),
            other => AssetError::Request(format!("{url}: {other}")),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetSource for HttpAssetSource {
    fn list_icons(&self, query: &IconQuery) -> AssetResult<Vec<String>> {
        let url = format!("{}/icons", self.base_url);
        let page = query.page.to_string();
        let mut response = ureq::get(&url)
            .query("category", &query.category)
            .query("page", &page)
            .query("search", &query.search)
            .call()
            .map_err(|e| Self::request_error(&url, e))?;
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Self::request_error(&url, e))?;
        let paths: Vec<String> = serde_json::from_str(&body)?;
        log::debug!("Listed {} icons for {query:?}", paths.len());
        Ok(paths)
    }

    fn fetch(&self, path: &str) -> AssetResult<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut response = ureq::get(&url)
            .call()
            .map_err(|e| Self::request_error(&url, e))?;
        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| Self::request_error(&url, e))
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAssetSource;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::{AssetSource, IconQuery};
    use crate::error::{AssetError, AssetResult};

    enum Request {
        Loading,
        Done(Result<Vec<u8>, Failure>),
    }

    enum Failure {
        NotFound,
        Other(String),
    }

    impl Failure {
        fn into_error(self, url: String) -> AssetError {
            match self {
                Failure::NotFound => AssetError::NotFound(url),
                Failure::Other(message) => AssetError::Request(format!("{url}: {message}")),
            }
        }
    }

    fn js_failure(value: JsValue) -> Failure {
        Failure::Other(format!("{value:?}"))
    }

    fn encode(component: &str) -> String {
        js_sys::encode_uri_component(component).into()
    }

    async fn fetch_bytes(url: &str) -> Result<Vec<u8>, Failure> {
        let window = web_sys::window().ok_or_else(|| Failure::Other("no window".to_owned()))?;
        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(js_failure)?;
        let response: web_sys::Response = response.dyn_into().map_err(js_failure)?;
        if response.status() == 404 {
            return Err(Failure::NotFound);
        }
        if !response.ok() {
            return Err(Failure::Other(format!("HTTP {}", response.status())));
        }
        let buffer = JsFuture::from(response.array_buffer().map_err(js_failure)?)
            .await
            .map_err(js_failure)?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }

    /// Browser `fetch` client for the icon listing service.
    ///
    /// The first lookup of a URL starts the request and reports
    /// [`AssetError::Pending`]. Successful responses stay cached; a failure
    /// is reported once and the next lookup requests the URL again.
    #[derive(Clone)]
    pub struct WebAssetSource {
        base_url: String,
        requests: Rc<RefCell<HashMap<String, Request>>>,
    }

    impl WebAssetSource {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into().trim_end_matches('/').to_owned(),
                requests: Rc::default(),
            }
        }

        fn get(&self, url: String) -> AssetResult<Vec<u8>> {
            let mut requests = self.requests.borrow_mut();
            match requests.remove(&url) {
                Some(Request::Loading) => {
                    requests.insert(url.clone(), Request::Loading);
                    return Err(AssetError::Pending(url));
                }
                Some(Request::Done(Ok(bytes))) => {
                    requests.insert(url, Request::Done(Ok(bytes.clone())));
                    return Ok(bytes);
                }
                Some(Request::Done(Err(failure))) => return Err(failure.into_error(url)),
                None => {}
            }
            requests.insert(url.clone(), Request::Loading);
            drop(requests);

            log::debug!("Fetching {url}");
            let requests = Rc::clone(&self.requests);
            let key = url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fetch_bytes(&key).await;
                requests.borrow_mut().insert(key, Request::Done(result));
            });
            Err(AssetError::Pending(url))
        }
    }

    impl AssetSource for WebAssetSource {
        fn list_icons(&self, query: &IconQuery) -> AssetResult<Vec<String>> {
            let url = format!(
                "{}/icons?category={}&page={}&search={}",
                self.base_url,
                encode(&query.category),
                query.page,
                encode(&query.search)
            );
            let body = self.get(url)?;
            let paths: Vec<String> = serde_json::from_slice(&body)?;
            log::debug!("Listed {} icons for {query:?}", paths.len());
            Ok(paths)
        }

        fn fetch(&self, path: &str) -> AssetResult<Vec<u8>> {
            self.get(format!("{}/{}", self.base_url, path.trim_start_matches('/')))
        }
    }
}

/// In-memory icon set keyed by path, each tagged with a category
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSource {
    assets: BTreeMap<String, (String, Vec<u8>)>,
}

impl MemoryAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        path: impl Into<String>,
        category: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.assets
            .insert(path.into(), (category.into(), bytes.into()));
    }

    pub fn with(
        mut self,
        path: impl Into<String>,
        category: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(path, category, bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn list_icons(&self, query: &IconQuery) -> AssetResult<Vec<String>> {
        let search = query.search.to_lowercase();
        Ok(self
            .assets
            .iter()
            .filter(|(_, (category, _))| query.category.is_empty() || *category == query.category)
            .filter(|(path, _)| search.is_empty() || path.to_lowercase().contains(&search))
            .map(|(path, _)| path.clone())
            .skip(query.page as usize * ICON_PAGE_SIZE)
            .take(ICON_PAGE_SIZE)
            .collect())
    }

    fn fetch(&self, path: &str) -> AssetResult<Vec<u8>> {
        self.assets
            .get(path)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| AssetError::NotFound(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MemoryAssetSource {
        MemoryAssetSource::new()
            .with("animals/cat.svg", "animals", "<svg/>")
            .with("animals/dog.svg", "animals", "<svg/>")
            .with("food/apple.svg", "food", "<svg/>")
    }

    #[test]
    fn test_listing_filters_by_category_and_search() {
        let source = source();
        let animals = source
            .list_icons(&IconQuery {
                category: "animals".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(animals, vec!["animals/cat.svg", "animals/dog.svg"]);

        let dogs = source
            .list_icons(&IconQuery {
                search: "DOG".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(dogs, vec!["animals/dog.svg"]);
    }

    #[test]
    fn test_listing_pages() {
        let mut source = MemoryAssetSource::new();
        for i in 0..30 {
            source.insert(format!("icons/{i:02}.svg"), "misc", "<svg/>");
        }
        let second = source
            .list_icons(&IconQuery {
                page: 1,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(second.len(), 30 - ICON_PAGE_SIZE);
        assert_eq!(second[0], "icons/24.svg");
    }

    #[test]
    fn test_missing_asset() {
        assert!(matches!(
            source().fetch("nope.svg"),
            Err(AssetError::NotFound(path)) if path == "nope.svg"
        ));
    }
}
