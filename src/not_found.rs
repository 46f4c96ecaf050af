use crate::error::ApiError;
use crate::store::Navigator;
use tracing::info;

pub const NOT_FOUND_PATH: &str = "/404";

/// Navigate to the not-found page if any watched request failed.
///
/// Navigates at most once however many errors are present. Returns whether
/// it navigated.
pub fn redirect_on_error<'a, N, I>(navigator: &N, watched: I) -> bool
where
    N: Navigator + ?Sized,
    I: IntoIterator<Item = Option<&'a ApiError>>,
{
    match watched.into_iter().flatten().next() {
        Some(err) => {
            info!("Redirecting to {} after error: {}", NOT_FOUND_PATH, err);
            navigator.navigate(NOT_FOUND_PATH);
            true
        }
        None => false,
    }
}
