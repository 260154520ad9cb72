use crate::app::profiles::{should_show_chooser, ProfileOption};
use eframe::egui;

fn option_label(option: &ProfileOption) -> String {
    match &option.region {
        Some(region) => format!("{} ({})", option.name, region),
        None => option.name.clone(),
    }
}

/// Profile chooser for the search bar. Renders nothing with fewer than two profiles.
///
/// Returns the newly chosen profile name, if the user picked a different one.
pub fn show_profile_dropdown(
    ui: &mut egui::Ui,
    options: &[ProfileOption],
    selected: Option<&str>,
) -> Option<String> {
    if !should_show_chooser(options) {
        return None;
    }

    let mut current = selected.map(str::to_string);
    let response = egui::ComboBox::from_id_salt("aws_profile")
        .selected_text(selected.unwrap_or("Select AWS Profile"))
        .width(220.0)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(&mut current, Some(option.name.clone()), option_label(option));
            }
        })
        .response;
    response.on_hover_text("Select AWS Profile");

    current.filter(|name| Some(name.as_str()) != selected)
}
