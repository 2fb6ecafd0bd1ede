/// Lua script that attaches feedback only when the try-on exists.
///
/// KEYS\[1\] = the try-on record key
/// KEYS\[2\] = the feedback key for that try-on
/// KEYS\[3\] = the feedback index set
/// ARGV\[1\] = serialized feedback
/// ARGV\[2\] = try-on id
///
/// Returns 1 if the feedback was stored, 0 if the try-on does not exist.
pub const ATTACH_FEEDBACK: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return 0
end
redis.call('SET', KEYS[2], ARGV[1])
redis.call('SADD', KEYS[3], ARGV[2])
return 1
";
