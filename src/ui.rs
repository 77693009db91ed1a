use serde_json::json;

/// Renders the dashboard with its runtime config injected as `window.dashboardConfig`.
pub fn render_dashboard(ajax_url: &str, nonce: &str) -> String {
    let config = json!({ "ajaxUrl": ajax_url, "nonce": nonce })
        .to_string()
        .replace("</", "<\\/");
    INDEX_HTML.replace("{{DASHBOARD_CONFIG}}", &config)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Marketing Performance Dashboard</title>
  <style>
    :root {
      --bg: #f4f5fb;
      --ink: #23263a;
      --muted: #8a8ea6;
      --card: #ffffff;
      --accent: #667eea;
      --shadow: 0 20px 50px rgba(35, 38, 58, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 28px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.2rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    nav {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    nav button,
    .period button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      cursor: pointer;
      background: rgba(102, 126, 234, 0.12);
      color: var(--accent);
    }

    nav button.active,
    .period button.active {
      background: var(--accent);
      color: white;
    }

    .viewport {
      position: relative;
      overflow: hidden;
    }

    .slide {
      display: none;
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 26px;
      gap: 18px;
    }

    .slide.active {
      display: grid;
      animation: slide-in 420ms ease;
    }

    .slide.from-left.active {
      animation-name: slide-in-left;
    }

    .slide-header {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
    }

    .slide-header h2 {
      margin: 0;
    }

    .period {
      display: flex;
      gap: 6px;
    }

    #overview-chart {
      width: 100%;
      height: 360px;
    }

    .chart-grid {
      stroke: rgba(35, 38, 58, 0.08);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 14px;
      font-size: 0.9rem;
    }

    .legend span::before {
      content: "";
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 2px;
      margin-right: 6px;
      background: var(--swatch);
      vertical-align: -1px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .stat {
      border: 1px solid rgba(35, 38, 58, 0.08);
      border-radius: 16px;
      padding: 14px 16px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 14px;
    }

    .card {
      border: 1px solid rgba(35, 38, 58, 0.08);
      border-radius: 16px;
      padding: 16px;
      display: grid;
      gap: 8px;
    }

    .card h4 {
      margin: 0;
    }

    .card dl {
      margin: 0;
      display: grid;
      grid-template-columns: 1fr auto;
      gap: 4px 12px;
      font-size: 0.9rem;
    }

    .card dt {
      color: var(--muted);
    }

    details.order {
      border: 1px solid rgba(35, 38, 58, 0.08);
      border-radius: 12px;
      padding: 12px 16px;
    }

    details.order summary {
      cursor: pointer;
      font-weight: 600;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      margin-top: 10px;
      font-size: 0.9rem;
    }

    th,
    td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(35, 38, 58, 0.06);
    }

    .card[data-campaign-id] {
      cursor: pointer;
    }

    .detail {
      margin-top: 18px;
    }

    .detail[hidden] {
      display: none;
    }

    .status {
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @keyframes slide-in {
      from { opacity: 0; transform: translateX(40px); }
      to { opacity: 1; transform: translateX(0); }
    }

    @keyframes slide-in-left {
      from { opacity: 0; transform: translateX(-40px); }
      to { opacity: 1; transform: translateX(0); }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Marketing Performance Overview</h1>
      <p class="subtitle">Digital spend and broadcast airings across all channels.</p>
    </header>

    <nav>
      <button type="button" data-slide="welcome" class="active">Overview</button>
      <button type="button" data-slide="tvradio">TV / Radio</button>
      <button type="button" data-slide="google">Google Ads</button>
      <button type="button" data-slide="facebook">Meta Ads</button>
    </nav>

    <div class="viewport">
      <section class="slide active" data-slide="welcome">
        <div class="slide-header">
          <h2>All channels</h2>
          <div class="period">
            <button type="button" data-period="weekly" class="active">Weekly</button>
            <button type="button" data-period="monthly">Monthly</button>
          </div>
        </div>
        <svg id="overview-chart" viewBox="0 0 900 360" role="img" aria-label="Overview chart"></svg>
        <div class="legend" id="overview-legend"></div>
      </section>

      <section class="slide" data-slide="tvradio">
        <div class="slide-header"><h2>Syracuse/Rochester stations</h2></div>
        <div class="stats">
          <div class="stat"><span class="label">Stations</span><span class="value" id="tv-stations">-</span></div>
          <div class="stat"><span class="label">Orders</span><span class="value" id="tv-orders">-</span></div>
          <div class="stat"><span class="label">Ads played</span><span class="value" id="tv-ads">-</span></div>
        </div>
        <div id="tv-stations-list"></div>
      </section>

      <section class="slide" data-slide="google">
        <div class="slide-header"><h2>Google Ads campaigns</h2></div>
        <div class="cards" id="google-cards"></div>
        <div class="detail" id="google-detail" hidden>
          <div class="slide-header">
            <h3 id="google-detail-title"></h3>
            <div class="period" id="google-detail-range">
              <button type="button" data-days="7">7 days</button>
              <button type="button" data-days="30" class="active">30 days</button>
              <button type="button" data-days="90">90 days</button>
              <button type="button" data-days="-1">All time</button>
            </div>
          </div>
          <div class="stats" id="google-detail-metrics"></div>
        </div>
      </section>

      <section class="slide" data-slide="facebook">
        <div class="slide-header"><h2>Meta Ads campaigns</h2></div>
        <div class="cards" id="facebook-cards"></div>
        <div class="detail" id="facebook-detail" hidden>
          <div class="slide-header"><h3 id="facebook-detail-title"></h3></div>
          <div class="cards" id="facebook-adsets"></div>
        </div>
      </section>
    </div>

    <div class="status" id="status"></div>
  </main>

  <script>
    window.dashboardConfig = {{DASHBOARD_CONFIG}};

    const SLIDE_ORDER = ['welcome', 'tvradio', 'google', 'facebook'];
    const STATIONS = [
      { key: 'wtla', action: 'fetch_wtla_ads' },
      { key: 'wkrl', action: 'fetch_tvradio_ads' },
      { key: 'wktw', action: 'fetch_wktw_ads' },
      { key: 'wzun', action: 'fetch_wzun_ads' }
    ];
    const COLORS = ['#34a853', '#1877f2', '#ff6b6b', '#feca57', '#ee5a6f', '#48dbfb', '#a29bfe', '#00b894'];

    const createState = (config) => ({
      config,
      slide: 'welcome',
      period: 'weekly',
      chart: null,
      stations: {},
      detail: { google: null, facebook: null }
    });

    const el = (id) => document.getElementById(id);

    const escapeHtml = (value) =>
      String(value ?? '').replace(/[&<>"']/g, (ch) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[ch]));

    const setStatus = (message, type) => {
      const status = el('status');
      status.textContent = message;
      status.dataset.type = type || '';
    };

    const callAction = async (state, action, fields = {}) => {
      const body = new URLSearchParams({ action, nonce: state.config.nonce, ...fields });
      const res = await fetch(state.config.ajaxUrl, { method: 'POST', body });
      const result = await res.json();
      if (!result.success) {
        throw new Error(result.data && result.data.message ? result.data.message : 'Request failed');
      }
      return result.data;
    };

    const formatMoney = (value) =>
      '$' + Number(value || 0).toLocaleString('en-US', { maximumFractionDigits: 0 });

    const formatCount = (value) => {
      const n = Number(value || 0);
      if (n >= 1000000) return (n / 1000000).toFixed(1) + 'M';
      if (n >= 1000) return (n / 1000).toFixed(1) + 'K';
      return n.toLocaleString('en-US');
    };

    const renderChart = (svg, legend, chart) => {
      const width = 900;
      const height = 360;
      const pad = { left: 60, right: 60, top: 20, bottom: 40 };
      const labels = chart.weekLabels;
      const columns = chart.series.filter((s) => s.type === 'column');
      const lines = chart.series.filter((s) => s.type === 'line');

      if (!labels.length || !chart.series.length) {
        svg.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        legend.innerHTML = '';
        return;
      }

      const maxOf = (series) => Math.max(1, ...series.flatMap((s) => s.points));
      const spendMax = maxOf(columns);
      const adsMax = maxOf(lines);
      const slot = (width - pad.left - pad.right) / labels.length;
      const plotHeight = height - pad.top - pad.bottom;
      const y = (value, max) => height - pad.bottom - (value / max) * plotHeight;
      const xCenter = (i) => pad.left + slot * i + slot / 2;

      let out = '';
      for (let t = 0; t <= 4; t += 1) {
        const yPos = pad.top + (plotHeight * t) / 4;
        out += `<line class="chart-grid" x1="${pad.left}" y1="${yPos}" x2="${width - pad.right}" y2="${yPos}" />`;
        out += `<text class="chart-label" x="${pad.left - 8}" y="${yPos + 4}" text-anchor="end">${formatMoney(spendMax * (1 - t / 4))}</text>`;
        out += `<text class="chart-label" x="${width - pad.right + 8}" y="${yPos + 4}">${Math.round(adsMax * (1 - t / 4))}</text>`;
      }

      const barWidth = columns.length ? (slot * 0.7) / columns.length : 0;
      columns.forEach((series, s) => {
        series.points.forEach((value, i) => {
          const x = pad.left + slot * i + slot * 0.15 + barWidth * s;
          const top = y(value, spendMax);
          out += `<rect x="${x}" y="${top}" width="${barWidth}" height="${height - pad.bottom - top}" fill="${COLORS[s % COLORS.length]}" opacity="0.85"><title>${escapeHtml(series.name)}: ${formatMoney(value)}</title></rect>`;
        });
      });

      lines.forEach((series, s) => {
        const color = COLORS[(columns.length + s) % COLORS.length];
        const path = series.points.map((v, i) => `${i === 0 ? 'M' : 'L'} ${xCenter(i)} ${y(v, adsMax)}`).join(' ');
        out += `<path d="${path}" fill="none" stroke="${color}" stroke-width="3" />`;
        series.points.forEach((v, i) => {
          out += `<circle cx="${xCenter(i)}" cy="${y(v, adsMax)}" r="4" fill="white" stroke="${color}" stroke-width="2"><title>${escapeHtml(series.name)}: ${v} ads played</title></circle>`;
        });
      });

      labels.forEach((label, i) => {
        out += `<text class="chart-label" x="${xCenter(i)}" y="${height - pad.bottom + 18}" text-anchor="middle">${escapeHtml(label)}</text>`;
      });

      svg.innerHTML = out;
      legend.innerHTML = chart.series
        .map((series, i) => `<span style="--swatch:${COLORS[i % COLORS.length]}">${escapeHtml(series.name)}</span>`)
        .join('');
    };

    const renderStations = (state) => {
      const loaded = Object.entries(state.stations).filter(([, data]) => data && data.orders && data.orders.length);
      const orderNumbers = new Set();
      let totalAds = 0;
      loaded.forEach(([, data]) => {
        data.orders.forEach((order) => orderNumbers.add(order.orderNumber));
        totalAds += (data.summary && data.summary.totalAds) || 0;
      });
      el('tv-stations').textContent = loaded.length;
      el('tv-orders').textContent = orderNumbers.size;
      el('tv-ads').textContent = totalAds.toLocaleString('en-US');

      el('tv-stations-list').innerHTML = loaded
        .map(([key, data]) => {
          const range = data.summary && data.summary.dateRange ? data.summary.dateRange.display || '-' : '-';
          const orders = data.orders
            .map((order) => {
              const rows = (order.dailyBreakdown || []).length
                ? order.dailyBreakdown
                    .map((day) => `<tr><td>${escapeHtml(day.date)}</td><td>${escapeHtml(day.adCount)}</td><td>${escapeHtml((day.adIDs || []).join(', ') || '-')}</td></tr>`)
                    .join('')
                : '<tr><td colspan="3">No daily data available</td></tr>';
              return `<details class="order"><summary>${escapeHtml(order.orderNumber)} &middot; ${escapeHtml(order.totalAds)} ads</summary>
                <table><thead><tr><th>Date Aired</th><th># of Ads Ran</th><th>Ad-ID</th></tr></thead><tbody>${rows}</tbody></table></details>`;
            })
            .join('');
          return `<h3>${key.toUpperCase()} <small class="subtitle">${escapeHtml(range)}</small></h3>${orders}`;
        })
        .join('');
    };

    const renderCampaigns = (container, campaigns) => {
      if (!campaigns || !campaigns.length) {
        container.innerHTML = '<p class="subtitle">No campaigns found</p>';
        return;
      }
      container.innerHTML = campaigns
        .map((c) => `<div class="card" data-campaign-id="${escapeHtml(c.id)}" data-campaign-name="${escapeHtml(c.name)}"><h4>${escapeHtml(c.name)}</h4><dl>
            <dt>Daily budget</dt><dd>${formatMoney(c.budget)}/day</dd>
            <dt>Spend</dt><dd>${formatMoney(c.spend)}</dd>
            <dt>Impressions</dt><dd>${formatCount(c.impressions)}</dd>
            <dt>Clicks</dt><dd>${formatCount(c.clicks)}</dd>
          </dl></div>`)
        .join('');
    };

    const stat = (label, value) =>
      `<div class="stat"><span class="label">${label}</span><span class="value">${escapeHtml(value)}</span></div>`;

    const renderGoogleMetrics = (data) => {
      el('google-detail-metrics').innerHTML = [
        stat('Spent', formatMoney(data.spend)),
        stat('Impressions', formatCount(data.impressions)),
        stat('Clicks', formatCount(data.clicks)),
        stat('CTR', `${data.ctr ?? 0}%`),
        stat('Avg. CPC', `$${data.avgCpc ?? 0}`)
      ].join('');
    };

    const renderAdSets = (data) => {
      const adsets = data.adsets || [];
      el('facebook-adsets').innerHTML = adsets.length
        ? adsets
            .map((a) => `<div class="card"><h4>${escapeHtml(a.name)}</h4><dl>
                <dt>Active ads</dt><dd>${escapeHtml(a.activeAds ?? 0)}</dd>
                <dt>Spent</dt><dd>${formatMoney(a.spend)}</dd>
                <dt>Impressions</dt><dd>${formatCount(a.impressions)}</dd>
                <dt>Clicks</dt><dd>${formatCount(a.clicks)}</dd>
                <dt>CTR</dt><dd>${escapeHtml(a.ctr ?? 0)}%</dd>
                <dt>Reach</dt><dd>${formatCount(a.reach)}</dd>
                <dt>CPC</dt><dd>$${escapeHtml(a.cpc ?? 0)}</dd>
              </dl></div>`)
            .join('')
        : '<p class="subtitle">No active ad sets found</p>';
    };

    const loadGoogleDetail = async (state, days) => {
      const detail = state.detail.google;
      detail.days = days;
      document.querySelectorAll('#google-detail-range button').forEach((button) => {
        button.classList.toggle('active', Number(button.dataset.days) === days);
      });
      renderGoogleMetrics(
        await callAction(state, 'fetch_google_campaign_metrics', { campaign_id: detail.id, days })
      );
    };

    const loadFacebookDetail = async (state) => {
      renderAdSets(await callAction(state, 'fetch_facebook_campaign_adsets', { campaign_id: state.detail.facebook.id }));
    };

    const showCampaignDetail = (state, platform, card) => {
      state.detail[platform] = { id: card.dataset.campaignId, name: card.dataset.campaignName, days: 30 };
      el(`${platform}-detail`).hidden = false;
      el(`${platform}-detail-title`).textContent = card.dataset.campaignName;
      const load = platform === 'google' ? loadGoogleDetail(state, 30) : loadFacebookDetail(state);
      load.catch((err) => setStatus(err.message, 'error'));
    };

    const loadOverview = async (state) => {
      setStatus('Loading chart data...', 'info');
      state.chart = await callAction(state, 'fetch_welcome_chart', { period: state.period });
      renderChart(el('overview-chart'), el('overview-legend'), state.chart);
      setStatus('', '');
    };

    const loadStations = async (state) => {
      await Promise.all(
        STATIONS.map(async (station) => {
          try {
            state.stations[station.key] = await callAction(state, station.action);
          } catch (err) {
            state.stations[station.key] = null;
          }
        })
      );
      renderStations(state);
    };

    const loadCampaigns = async (state, action, containerId) => {
      const data = await callAction(state, action);
      renderCampaigns(el(containerId), data.campaigns);
    };

    const navigateToSlide = (state, target) => {
      if (target === state.slide) {
        return;
      }
      const forward = SLIDE_ORDER.indexOf(target) > SLIDE_ORDER.indexOf(state.slide);
      document.querySelectorAll('.slide').forEach((slide) => {
        const active = slide.dataset.slide === target;
        slide.classList.toggle('active', active);
        slide.classList.toggle('from-left', active && !forward);
      });
      document.querySelectorAll('nav button').forEach((button) => {
        button.classList.toggle('active', button.dataset.slide === target);
      });
      state.slide = target;
    };

    const setPeriod = (state, period) => {
      state.period = period;
      document.querySelectorAll('.period button').forEach((button) => {
        button.classList.toggle('active', button.dataset.period === period);
      });
      loadOverview(state).catch((err) => setStatus(err.message, 'error'));
    };

    const init = (state) => {
      document.querySelectorAll('nav button').forEach((button) => {
        button.addEventListener('click', () => navigateToSlide(state, button.dataset.slide));
      });
      document.querySelectorAll('.period button').forEach((button) => {
        button.addEventListener('click', () => setPeriod(state, button.dataset.period));
      });

      ['google', 'facebook'].forEach((platform) => {
        el(`${platform}-cards`).addEventListener('click', (event) => {
          const card = event.target.closest('[data-campaign-id]');
          if (card) showCampaignDetail(state, platform, card);
        });
      });
      document.querySelectorAll('#google-detail-range button').forEach((button) => {
        button.addEventListener('click', () => {
          if (!state.detail.google) return;
          loadGoogleDetail(state, Number(button.dataset.days)).catch((err) => setStatus(err.message, 'error'));
        });
      });

      const report = (err) => setStatus(err.message, 'error');
      loadOverview(state).catch(report);
      loadStations(state).catch(report);
      loadCampaigns(state, 'fetch_google_ads_campaigns', 'google-cards').catch(report);
      loadCampaigns(state, 'fetch_facebook_ads', 'facebook-cards').catch(report);
    };

    init(createState(window.dashboardConfig));
  </script>
</body>
</html>
"#;
