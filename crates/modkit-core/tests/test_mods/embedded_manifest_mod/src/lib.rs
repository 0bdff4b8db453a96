use std::os::raw::c_char;

static MANIFEST: &[u8] = b"{\
    \"id\": \"Embedded\",\
    \"name\": \"Embedded Mod\",\
    \"author\": \"Modkit Tests\",\
    \"version\": \"2.1\",\
    \"dependencies\": [\"core 1.0\"],\
    \"load_after\": [\"core\"]\
}\0";

#[no_mangle]
pub extern "C" fn modkit_manifest() -> *const c_char {
    MANIFEST.as_ptr() as *const c_char
}
