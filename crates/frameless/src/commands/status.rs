use frameless_core::INSTANCE_NAME;

pub fn execute() {
    if frameless_windows::is_instance_running(INSTANCE_NAME) {
        println!("Frameless is running.");
    } else {
        println!("Frameless is not running.");
    }
}
