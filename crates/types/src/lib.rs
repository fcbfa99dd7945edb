mod models;

pub use models::{
    ArchiveKind, ConversationTurn, Role, SearchHit, SearchRecord, LINE_TIMESTAMP_FORMAT,
    MINUTE_STAMP_FORMAT,
};
