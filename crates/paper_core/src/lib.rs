pub mod domain;
pub mod export;
pub mod fonts;
pub mod ports;
pub mod themes;

pub use domain::{
    Paper, PaperFields, PaperPatch, PaperStatus, PinnedFile, PublishReceipt, PublishRequest, User,
};
pub use fonts::Font;
pub use ports::{
    IdentityService, PaperRepository, PinningService, PortError, PortResult, PublishService,
    Rasterizer,
};
pub use themes::Theme;
