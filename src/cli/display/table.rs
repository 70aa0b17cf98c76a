//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::config::Preset;
use crate::domain::resolver::LayerRecord;
use crate::infrastructure::k3d::ClusterSummary;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render clusters list as a formatted table
    pub fn render_clusters_list(&self, clusters: &[ClusterSummary]) -> String {
        if clusters.is_empty() {
            return "No k3d clusters found".to_string();
        }

        let mut table = new_table();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("CLUSTER").set_alignment(CellAlignment::Left),
                Cell::new("SERVERS").set_alignment(CellAlignment::Center),
                Cell::new("AGENTS").set_alignment(CellAlignment::Center),
                Cell::new("LOADBALANCER").set_alignment(CellAlignment::Center),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for cluster in clusters {
            let server_icon =
                StatusIcon::get_node_icon(cluster.servers_running, cluster.servers_count);
            let agent_icon = StatusIcon::get_node_icon(cluster.agents_running, cluster.agents_count);

            let status = StatusIcon::get_cluster_status(
                cluster.servers_running,
                cluster.servers_count,
                cluster.agents_running,
                cluster.agents_count,
            );
            let (status_icon, status_color) = match status {
                "Running" => (StatusIcon::SUCCESS, Color::Green),
                "Degraded" => (StatusIcon::WARNING, Color::Yellow),
                "Unknown" => (StatusIcon::UNKNOWN, Color::DarkGrey),
                _ => (StatusIcon::ERROR, Color::Red),
            };

            table.add_row(vec![
                Cell::new(&cluster.name),
                Cell::new(format!(
                    "{} {}/{}",
                    server_icon, cluster.servers_running, cluster.servers_count
                ))
                .fg(self
                    .theme
                    .get_node_color(cluster.servers_running, cluster.servers_count)),
                Cell::new(format!(
                    "{} {}/{}",
                    agent_icon, cluster.agents_running, cluster.agents_count
                ))
                .fg(self
                    .theme
                    .get_node_color(cluster.agents_running, cluster.agents_count)),
                Cell::new(if cluster.has_loadbalancer { "yes" } else { "no" }),
                Cell::new(format!("{} {}", status_icon, status)).fg(status_color),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ k3d Clusters {} ─╮\n",
            format!("[{} clusters]", clusters.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Running  {} Degraded  {} Stopped\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::ERROR.red()
        ));

        output
    }

    /// Render the preset registry
    pub fn render_presets(&self, presets: &[Preset]) -> String {
        let mut table = new_table();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["PRESET", "LAYERS", "DESCRIPTION"]);

        for preset in presets {
            let layers: Vec<String> = preset.layers().iter().map(ToString::to_string).collect();
            table.add_row(vec![
                Cell::new(preset.name).fg(self.theme.info),
                Cell::new(layers.join("\n")),
                Cell::new(preset.description).fg(self.theme.muted),
            ]);
        }

        table.to_string()
    }

    /// Render the layers applied during a resolution, lowest precedence first
    pub fn render_layers(&self, layers: &[LayerRecord]) -> String {
        let mut table = new_table();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "LAYER", "SOURCE"]);

        for (i, layer) in layers.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(layer.kind.to_string()).fg(self.theme.info),
                Cell::new(&layer.source),
            ]);
        }

        table.to_string()
    }
}

/// Table that honours `--no-color` and non-terminal stdout
fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        table.force_no_tty();
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{OptionCategory, PresetRegistry};
    use crate::domain::resolver::LayerKind;

    fn summary(name: &str, servers: (u32, u32), agents: (u32, u32)) -> ClusterSummary {
        ClusterSummary {
            name: name.to_string(),
            servers_running: servers.0,
            servers_count: servers.1,
            agents_running: agents.0,
            agents_count: agents.1,
            has_loadbalancer: true,
        }
    }

    #[test]
    fn test_render_empty_clusters() {
        let renderer = TableRenderer::new();
        let output = renderer.render_clusters_list(&[]);
        assert!(output.contains("No k3d clusters found"));
    }

    #[test]
    fn test_render_clusters() {
        let renderer = TableRenderer::new();
        let output = renderer.render_clusters_list(&[
            summary("dev", (1, 1), (2, 2)),
            summary("broken", (0, 1), (0, 2)),
        ]);
        assert!(output.contains("dev"));
        assert!(output.contains("1/1"));
        assert!(output.contains("2/2"));
        assert!(output.contains("Running"));
        assert!(output.contains("Stopped"));
    }

    #[test]
    fn test_render_presets() {
        let output = TableRenderer::new().render_presets(PresetRegistry::all());
        assert!(output.contains("two-node-dev"));
        assert!(output.contains("ports/dev"));
        assert!(output.contains("<disable-traefik>"));
    }

    #[test]
    fn test_render_layers() {
        let layers = vec![
            LayerRecord {
                kind: LayerKind::Base,
                source: "<builtin base>".to_string(),
            },
            LayerRecord {
                kind: LayerKind::Option(OptionCategory::Agents),
                source: "/tmp/agents/2.yaml".to_string(),
            },
        ];
        let output = TableRenderer::new().render_layers(&layers);
        assert!(output.contains("option agents"));
        assert!(output.contains("/tmp/agents/2.yaml"));
    }
}
