mod settings;

pub use settings::SettingsView;
