/// Base file name of a URL, ignoring any query string or fragment.
///
/// `https://host/a/b/pkg.tar.gz?x=1#y` -> `pkg.tar.gz`
pub fn file_name(url: &str) -> &str {
    let url = url.split('#').next().unwrap_or(url);
    let url = url.split('?').next().unwrap_or(url);
    url.rsplit('/').next().unwrap_or(url)
}
