pub const TAKEOFF_INSTRUCTION: &str = include_str!("../data/prompts/takeoff.txt");
