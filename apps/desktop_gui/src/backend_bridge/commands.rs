//! Backend commands queued from UI to backend worker.

use shared::domain::ResultLink;

pub enum BackendCommand {
    Search { term: String },
    OpenLink { link: ResultLink },
}
