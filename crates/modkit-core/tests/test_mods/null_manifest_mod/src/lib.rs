use std::os::raw::c_char;

// Exports the accessor but has no manifest to hand out.
#[no_mangle]
pub extern "C" fn modkit_manifest() -> *const c_char {
    std::ptr::null()
}
