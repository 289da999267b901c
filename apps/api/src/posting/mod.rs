// Job posting: form draft, live preview, stake parsing and the prepared
// contract call. The wallet sends the transaction; nothing here touches
// the chain.

pub mod draft;
pub mod handlers;
pub mod prepare;
pub mod stake;
