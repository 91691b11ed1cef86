mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use crate::db::Question;
use crate::pagination::{paginate, PageQuery, QUESTIONS_PER_PAGE};

use super::error::{ApiError, ApiResponse};

/// Page numbers below 1 are a bad request.
fn page_number(query: PageQuery) -> ApiResponse<usize> {
    usize::try_from(query.page)
        .ok()
        .filter(|p| *p >= 1)
        .ok_or_else(|| ApiError::BadRequest(format!("invalid page {}", query.page)))
}

/// Page slice for listing endpoints. A page with no overlap is a bad
/// request, except the first page of an empty listing.
fn listing_page(query: PageQuery, items: &[Question]) -> ApiResponse<Vec<Question>> {
    let page = page_number(query)?;
    let current = paginate(page, QUESTIONS_PER_PAGE, items);
    if current.is_empty() && !(page == 1 && items.is_empty()) {
        return Err(ApiError::BadRequest(format!(
            "page {page} is past the last page"
        )));
    }
    Ok(current)
}
