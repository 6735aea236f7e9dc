/// Built-in values used when neither the command line nor the config file sets a parameter.
pub struct DefaultsConfig {
    pub hbar: f64,
    pub force_constant: f64,
    pub mass: f64,
    pub max_level: u32,
    pub grid_start: f64,
    pub grid_stop: f64,
    pub grid_step: f64,
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    pub mode_mass: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hbar: 1.0,
            force_constant: 1.0,
            mass: 1.0,
            max_level: 2,
            grid_start: -20.0,
            grid_stop: 20.0,
            grid_step: 0.01,
            k1: 1.0,
            k2: 1.0,
            k3: 1.0,
            mode_mass: 1.0,
        }
    }
}
