//! Headless browser access for reading product pages

pub mod traits;
pub mod profile;
pub mod webdriver;
pub mod extractor;

pub use traits::{PageSession, SessionFactory};
pub use profile::BrowserProfile;
pub use webdriver::{WebDriverSession, WebDriverSessionFactory};
pub use extractor::ProductExtractor;
