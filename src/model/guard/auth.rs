/// used to represent the result of calling `HeaderAuth::validate`
pub enum ValidateResult {
    Ok,
    NoPasswordSet,
    Invalid,
}
