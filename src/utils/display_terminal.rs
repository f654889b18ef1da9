//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 시작 과정(레지스트리 초기화, 인덱스 준비, 리포지토리 init)을
//! 박스 제목과 단계 표시로 출력합니다. 문자열 생성(`format_*`)과
//! 출력(`print_*`)을 분리해 두었습니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목 문자열을 만듭니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                WASTE PRODUCTS API                ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn format_boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!(
        "╔{border}╗\n║{title:^width$}║\n╚{border}╝",
        border = border,
        title = title,
        width = BOX_WIDTH
    )
}

pub fn print_boxed_title(title: &str) {
    println!("{}", format_boxed_title(title));
}

/// `→ Step 1: Opening product search index`
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// `✓ Step 1: Repositories initialized (6 items)`
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn format_sub_task(name: &str, status: &str) -> String {
    format!("   ├─ {}: {}", name, status)
}

/// 들여쓰기된 하위 작업 상태를 출력합니다.
pub fn print_sub_task(name: &str, status: &str) {
    println!("{}", format_sub_task(name, status));
}

/// 레지스트리 초기화 요약을 출력합니다.
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 생성자 테이블 구성 결과 (`   ├─ Repository constructors: 6 entries loaded`)
pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("{}", format_sub_task(&format!("{} constructors", cache_type), &format!("{} entries loaded", count)));
}

/// 서버 바인딩 직전의 안내 메시지를 출력합니다.
pub fn print_server_ready(bind_address: &str, indexed_products: usize) {
    print_boxed_title("🚀 WASTE PRODUCTS API READY");
    println!("   🌐 Listening on http://{}", bind_address);
    println!("   🔎 Indexed products: {}", indexed_products);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_is_centered() {
        let boxed = format_boxed_title("API");
        let lines: Vec<&str> = boxed.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with('║') && lines[1].ends_with('║'));
        assert_eq!(lines[1].chars().count(), BOX_WIDTH + 2);
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn test_sub_task_format() {
        assert_eq!(format_sub_task("ProductRepository", "OK"), "   ├─ ProductRepository: OK");
    }
}
