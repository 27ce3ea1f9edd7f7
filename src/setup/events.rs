use crate::input::InputFrame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SetupTick {
    pub(crate) now_ms: u64,
    pub(crate) frame: InputFrame,
}
