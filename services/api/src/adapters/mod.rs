pub mod account;
pub mod appwrite;
pub mod chrome;
pub mod functions;
pub mod pinata;
pub mod tables;

pub use account::AppwriteAccountAdapter;
pub use appwrite::AppwriteClient;
pub use chrome::ChromeRasterizer;
pub use functions::AppwriteFunctionsAdapter;
pub use pinata::PinataAdapter;
pub use tables::AppwriteTablesAdapter;
