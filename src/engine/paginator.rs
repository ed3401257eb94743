use serde::de::DeserializeOwned;

use crate::{error::Result, remote::RemoteCollection, types::Page};

enum Position<T> {
    /// A page that has been fetched but not handed out yet.
    Ready(Page<T>),
    /// The cursor of the next page; nothing is fetched until it is asked for.
    Cursor(String),
    Exhausted,
}

/// Walks a cursor-linked collection page by page.
///
/// The following page is only requested when the caller asks for it, so a
/// page is always fully processed before the next request goes out. The walk
/// ends when a page carries no cursor; there is no page or time limit.
pub struct Paginator<'a, R, T> {
    remote: &'a R,
    position: Position<T>,
    pages: usize,
    items: usize,
}

impl<'a, R, T> Paginator<'a, R, T>
where
    R: RemoteCollection,
    T: DeserializeOwned + Send,
{
    pub fn new(remote: &'a R, first: Page<T>) -> Self {
        Self {
            remote,
            position: Position::Ready(first),
            pages: 0,
            items: 0,
        }
    }

    /// Items of the next page, or `None` once the collection is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let page = match std::mem::replace(&mut self.position, Position::Exhausted) {
            Position::Ready(page) => page,
            Position::Cursor(cursor) => match self.remote.next_page::<T>(&cursor).await? {
                Some(page) => page,
                None => return Ok(None),
            },
            Position::Exhausted => return Ok(None),
        };

        if let Some(cursor) = page.next {
            self.position = Position::Cursor(cursor);
        }

        self.pages += 1;
        self.items += page.items.len();
        Ok(Some(page.items))
    }

    /// Hands every page to `on_page` in order and returns the number of pages.
    pub async fn for_each_page<F>(mut self, mut on_page: F) -> Result<usize>
    where
        F: FnMut(Vec<T>),
    {
        while let Some(items) = self.next_page().await? {
            on_page(items);
        }
        Ok(self.pages)
    }

    /// Pages handed out so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Items handed out so far.
    pub fn items(&self) -> usize {
        self.items
    }
}
