use crate::models::{NormalizedUser, UserListResponse};

/// Pages users out of a loaded response.
#[derive(Debug)]
pub struct UserFeed {
    source: UserListResponse,
    users: Vec<NormalizedUser>,
    page_size: usize,
    pages_loaded: usize,
}

impl UserFeed {
    pub fn new(source: UserListResponse, page_size: usize) -> Self {
        Self {
            source,
            users: Vec::new(),
            page_size: page_size.max(1),
            pages_loaded: 0,
        }
    }

    pub fn users(&self) -> &[NormalizedUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    pub fn is_exhausted(&self) -> bool {
        self.users.len() >= self.source.len()
    }

    /// Append the next page; returns how many users were added.
    pub fn load_next_page(&mut self) -> usize {
        if self.is_exhausted() {
            return 0;
        }
        let page = self.source.normalize_page(self.users.len(), self.page_size);
        let added = page.len();
        self.users.extend(page);
        self.pages_loaded += 1;
        added
    }
}
