use linelog::{Flags, Level, Logger};

#[test]
fn builder_env_overrides_and_ignores_garbage() {
    std::env::set_var("LINELOG_LEVEL", "warn");
    std::env::set_var("LINELOG_FLAGS", "time,shortfile");
    let lg = Logger::builder("svc").env().build().unwrap();
    assert_eq!(lg.min_level(), Level::Warn);
    assert_eq!(lg.flags(), Flags::TIME | Flags::SHORT_FILE);

    std::env::set_var("LINELOG_LEVEL", "bogus");
    std::env::set_var("LINELOG_FLAGS", "bogus");
    let lg = Logger::builder("svc").level(Level::Error).env().build().unwrap();
    assert_eq!(lg.min_level(), Level::Error);
    assert_eq!(lg.flags(), Flags::STANDARD);

    std::env::remove_var("LINELOG_LEVEL");
    std::env::remove_var("LINELOG_FLAGS");
    let lg = Logger::builder("svc").env().build().unwrap();
    assert_eq!(lg.min_level(), Level::Debug);
    assert_eq!(lg.flags(), Flags::STANDARD);
}
