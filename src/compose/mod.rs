pub mod composer;
pub mod descriptor;
pub mod markup;
pub mod mime;
pub mod options;
pub mod part;
pub mod pipeline;
pub mod table;

pub use composer::{FinalizedMessage, MessageComposer, PendingMessage, SendReceipt};
pub use descriptor::{Content, Descriptor, DescriptorBatch};
pub use options::{DeliveryOptions, OptionsPatch, TextFormat};
pub use part::Part;
pub use table::Table;
