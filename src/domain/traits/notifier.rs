/// Local, in-client output: advisory notices and locally rendered chat lines
pub trait Notifier: Send + Sync {
    /// Show an advisory notice; never blocks further interaction
    fn notify(&self, text: &str);

    /// Render a chat line locally without involving any remote party
    fn echo(&self, author: &str, text: &str);
}
