use types::config::PackageConfig;

/// Renders a binary package `DEBIAN/control` from the resolved
/// configuration. Optional fields are omitted entirely rather than written
/// empty.
pub fn render_control(config: &PackageConfig) -> String {
    let mut control = String::new();
    control.push_str(&format!("Package: {}\n", config.name));
    control.push_str(&format!("Version: {}\n", config.version));
    control.push_str(&format!("Section: {}\n", config.section));
    control.push_str(&format!("Priority: {}\n", config.priority));
    control.push_str(&format!("Architecture: {}\n", config.architecture));
    if let Some(depends) = &config.depends {
        control.push_str(&format!("Depends: {}\n", depends));
    }
    control.push_str(&format!("Maintainer: {}\n", config.maintainer));
    if let Some(homepage) = &config.homepage {
        control.push_str(&format!("Homepage: {}\n", homepage));
    }
    control.push_str(&format!(
        "Description: {}\n",
        description_field(config)
    ));
    control
}

// Control-file descriptions fold onto continuation lines prefixed with a
// space; blank lines become a lone dot. An empty description falls back to
// the package name so the field is never empty.
fn description_field(config: &PackageConfig) -> String {
    if config.description.is_empty() {
        return config.name.clone();
    }
    let mut lines = config.description.lines();
    let mut folded = lines.next().unwrap_or_default().to_string();
    for line in lines {
        folded.push('\n');
        if line.trim().is_empty() {
            folded.push_str(" .");
        } else {
            folded.push(' ');
            folded.push_str(line);
        }
    }
    folded
}
