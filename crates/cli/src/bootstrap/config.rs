use ferrous_zone_domain::Config;

pub fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    Ok(config)
}
