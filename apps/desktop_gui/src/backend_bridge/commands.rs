//! Backend commands queued from UI to the fetch worker.

pub enum BackendCommand {
    FetchRandomUser,
    FetchPortrait { url: String },
}
