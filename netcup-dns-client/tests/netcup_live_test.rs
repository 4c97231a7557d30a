//! netcup 实时接口集成测试
//!
//! 运行方式:
//! ```bash
//! NETCUP_CUSTOMER_NUMBER=xxx NETCUP_API_KEY=xxx NETCUP_API_PASSWORD=xxx TEST_DOMAIN=example.com \
//!     cargo test -p netcup-dns-client --test netcup_live_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{LiveContext, generate_test_record_name};
use netcup_dns_client::{DnsRecord, DnsRecordSet, RecordType, ResponseStatus};

#[tokio::test]
#[ignore = "integration test: requires NETCUP_CUSTOMER_NUMBER, NETCUP_API_KEY, NETCUP_API_PASSWORD and TEST_DOMAIN"]
async fn test_netcup_login_logout() {
    skip_if_no_credentials!(
        "NETCUP_CUSTOMER_NUMBER",
        "NETCUP_API_KEY",
        "NETCUP_API_PASSWORD",
        "TEST_DOMAIN"
    );

    let ctx = require_some!(LiveContext::from_env(), "创建测试上下文失败");
    let session = require_some!(ctx.login().await, "登录失败");
    assert!(!session.is_empty());

    let response = require_ok!(
        ctx.client
            .logout(
                ctx.credentials.customernumber,
                &ctx.credentials.apikey,
                &session,
                None
            )
            .await,
        "logout 调用失败"
    );
    assert_eq!(response.status, ResponseStatus::Success);

    println!("✓ login/logout 测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires NETCUP_CUSTOMER_NUMBER, NETCUP_API_KEY, NETCUP_API_PASSWORD and TEST_DOMAIN"]
async fn test_netcup_info_dns_zone_and_records() {
    skip_if_no_credentials!(
        "NETCUP_CUSTOMER_NUMBER",
        "NETCUP_API_KEY",
        "NETCUP_API_PASSWORD",
        "TEST_DOMAIN"
    );

    let ctx = require_some!(LiveContext::from_env(), "创建测试上下文失败");
    let session = require_some!(ctx.login().await, "登录失败");
    let creds = &ctx.credentials;

    let zone = require_ok!(
        ctx.client
            .info_dns_zone(
                &ctx.domain,
                creds.customernumber,
                &creds.apikey,
                &session,
                None,
            )
            .await,
        "infoDnsZone 调用失败"
    );
    let zone = require_ok!(zone.dns_zone(), "DNS zone 解析失败");
    assert_eq!(zone.name, ctx.domain);

    let records = require_ok!(
        ctx.client
            .info_dns_records(
                &ctx.domain,
                creds.customernumber,
                &creds.apikey,
                &session,
                None,
            )
            .await,
        "infoDnsRecords 调用失败"
    );
    let records = require_ok!(records.dns_records(), "DNS 记录解析失败");
    println!("✓ infoDnsRecords 测试通过，共 {} 条记录", records.len());

    ctx.logout(&session).await;
}

#[tokio::test]
#[ignore = "integration test: requires NETCUP_CUSTOMER_NUMBER, NETCUP_API_KEY, NETCUP_API_PASSWORD and TEST_DOMAIN"]
async fn test_netcup_create_and_delete_record() {
    skip_if_no_credentials!(
        "NETCUP_CUSTOMER_NUMBER",
        "NETCUP_API_KEY",
        "NETCUP_API_PASSWORD",
        "TEST_DOMAIN"
    );

    let ctx = require_some!(LiveContext::from_env(), "创建测试上下文失败");
    let session = require_some!(ctx.login().await, "登录失败");
    let creds = &ctx.credentials;
    let record_name = generate_test_record_name();

    // 1. 创建记录
    let record = DnsRecord::new(record_name.clone(), RecordType::Txt, "integration-test");
    let create: DnsRecordSet = vec![record].into();
    let response = require_ok!(
        ctx.client
            .update_dns_records(
                &ctx.domain,
                creds.customernumber,
                &creds.apikey,
                &session,
                None,
                &create
            )
            .await,
        "updateDnsRecords (create) 调用失败"
    );
    let response = require_ok!(response.ensure_success(), "创建记录失败");
    let records = require_ok!(response.dns_records());
    let created = require_some!(
        records
            .iter()
            .find(|r| r.hostname == record_name)
            .cloned(),
        "创建的记录应该出现在返回的记录集中"
    );
    println!("  ✓ 创建成功: id={}", created.id);

    // 2. 删除记录
    let delete: DnsRecordSet = vec![created.marked_for_deletion()].into();
    let response = require_ok!(
        ctx.client
            .update_dns_records(
                &ctx.domain,
                creds.customernumber,
                &creds.apikey,
                &session,
                None,
                &delete
            )
            .await,
        "updateDnsRecords (delete) 调用失败"
    );
    let response = require_ok!(response.ensure_success(), "删除记录失败");
    let records = require_ok!(response.dns_records());
    assert!(
        records.iter().all(|r| r.hostname != record_name),
        "删除后记录不应存在"
    );
    println!("  ✓ 删除成功");

    ctx.logout(&session).await;
}
