//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// All nodes running
    pub const SUCCESS: &'static str = "✓";

    /// Some nodes running
    pub const WARNING: &'static str = "⚠";

    /// No nodes running
    pub const ERROR: &'static str = "✗";

    pub const UNKNOWN: &'static str = "-";

    /// Get status icon based on running/total nodes
    pub fn get_node_icon(running: u32, total: u32) -> &'static str {
        if total == 0 {
            Self::UNKNOWN
        } else if running == total {
            Self::SUCCESS
        } else if running > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    /// Overall status of a cluster from its server and agent counts.
    /// A cluster without agents is judged on its servers alone.
    pub fn get_cluster_status(
        servers_running: u32,
        servers: u32,
        agents_running: u32,
        agents: u32,
    ) -> &'static str {
        let running = servers_running + agents_running;
        let total = servers + agents;
        if total == 0 {
            "Unknown"
        } else if running == total {
            "Running"
        } else if running > 0 {
            "Degraded"
        } else {
            "Stopped"
        }
    }
}
