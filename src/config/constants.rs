/// Capacity of the engine's event and action broadcast channels.
pub const ENGINE_MESSAGE_CHANNEL_CAPACITY: usize = 512;
