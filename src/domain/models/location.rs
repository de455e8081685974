/// The application's address. Mirrors the subset of the browser location API
/// needed to keep view state shareable: reading a query parameter, and
/// rewriting one in place without navigating.
pub trait Location {
    fn query_param(&self, name: &str) -> Option<String>;

    fn replace_query_param(&mut self, name: &str, value: &str);

    fn href(&self) -> String;
}
