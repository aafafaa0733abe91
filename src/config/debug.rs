//! Debug-build logging switches

pub struct DebugFlags {
    pub print_requests: bool,
    pub print_state_serde: bool,
    pub print_ui_interactions: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_requests: true,
    print_state_serde: false,
    print_ui_interactions: false,
};
