// An ordinary shared library: it exports something, but not the manifest
// accessor the loader looks for.
#[no_mangle]
pub extern "C" fn helper_answer() -> u32 {
    42
}
