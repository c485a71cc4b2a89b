//! URL helpers for static resources.

/// Resolve a site-relative resource against `document.baseURI`
///
/// The site may be served from a sub-path (`<base href="/Shadow-Force/">`),
/// so relative paths must not be resolved against the page location.
///
/// # Example
/// ```rust,ignore
/// let url = asset_url("assets/data/names.json");
/// ```
pub fn asset_url(path: &str) -> String {
    let base = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.base_uri().ok().flatten());

    match base {
        Some(base) => web_sys::Url::new_with_base(path, &base)
            .map(|url| url.href())
            .unwrap_or_else(|_| path.to_string()),
        None => path.to_string(),
    }
}

/// Focus an element by id, if it exists and is focusable
pub fn focus_element(id: &str) {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());

    if let Some(element) = element {
        let _ = element.focus();
    }
}
