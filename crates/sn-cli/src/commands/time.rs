use sn_engine::format_time;

pub fn run(minutes: u32) {
    println!("{}", format_time(minutes));
}
